//! Informed (A*) search.
//!
//! The relaxation is the one Dijkstra uses. Only the queue key changes:
//! stops are expanded by accumulated cost plus a lower bound on the cost
//! still to come.

use tracing::debug;

use crate::domain::{Coordinates, StopId};
use crate::graph::ScheduleGraph;

use super::config::SearchConfig;
use super::objective::Objective;
use super::path::reconstruct;
use super::relax::Relaxation;
use super::search::{Itinerary, SearchError, ensure_known};

/// Lower bound on the remaining cost from a stop to a fixed destination.
///
/// Implementations must never overestimate, and should satisfy
/// `estimate(u) <= cost(u, v) + estimate(v)` for every edge `u -> v` so
/// that the first time the destination is settled its cost is final.
pub trait Heuristic {
    /// Minutes that must at least elapse from `from` to the destination.
    fn estimate(&self, from: &StopId) -> u32;
}

/// The uninformative bound. A* with this heuristic is Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &StopId) -> u32 {
        0
    }
}

/// Straight-line distance to the destination at the fastest speed any
/// edge in the graph achieves.
///
/// Every ride covers at most its own duration times that speed, so the sum
/// of rides along any path is at least the straight-line distance divided
/// by it. Flooring to whole minutes keeps the bound consistent.
#[derive(Debug, Clone)]
pub struct GeoHeuristic<'g> {
    graph: &'g ScheduleGraph,
    destination: Option<Coordinates>,
    speed: Option<f64>,
}

impl<'g> GeoHeuristic<'g> {
    pub fn new(graph: &'g ScheduleGraph, destination: &StopId) -> Self {
        Self {
            graph,
            destination: graph.stop(destination).map(|s| s.location()),
            speed: graph.max_speed_m_per_min(),
        }
    }
}

impl Heuristic for GeoHeuristic<'_> {
    fn estimate(&self, from: &StopId) -> u32 {
        let (Some(destination), Some(speed)) = (self.destination, self.speed) else {
            return 0;
        };
        let Some(stop) = self.graph.stop(from) else {
            return 0;
        };

        let minutes = stop.location().distance_to(&destination) / speed;
        // Absorb rounding in the distance so the bound never tips over
        (minutes - 1e-6).max(0.0).floor() as u32
    }
}

/// A* from `source` to `destination` with the heuristic the objective calls
/// for: geographic for [`Objective::Time`], zero for
/// [`Objective::Transfers`].
pub fn astar(
    graph: &ScheduleGraph,
    source: &StopId,
    destination: &StopId,
    objective: Objective,
    config: &SearchConfig,
) -> Result<Itinerary, SearchError> {
    match objective {
        Objective::Time => {
            let heuristic = GeoHeuristic::new(graph, destination);
            astar_with(graph, source, destination, objective, &heuristic, config)
        }
        Objective::Transfers => {
            astar_with(graph, source, destination, objective, &ZeroHeuristic, config)
        }
    }
}

/// A* with a caller-supplied heuristic.
///
/// The heuristic only shapes the search order for [`Objective::Time`].
/// Transfer-minimizing searches have no useful lower bound and ignore it.
pub fn astar_with<H: Heuristic + ?Sized>(
    graph: &ScheduleGraph,
    source: &StopId,
    destination: &StopId,
    objective: Objective,
    heuristic: &H,
    config: &SearchConfig,
) -> Result<Itinerary, SearchError> {
    ensure_known(graph, source)?;
    ensure_known(graph, destination)?;

    let tree = Relaxation {
        graph,
        objective,
        heuristic,
        config,
    }
    .run(source, Some(destination));

    let itinerary = reconstruct(&tree, destination)?;

    debug!(
        source = %source,
        destination = %destination,
        objective = %objective,
        cost = itinerary.cost,
        settled = itinerary.settled,
        edges = itinerary.edges.len(),
        "A* search complete"
    );

    Ok(itinerary)
}
