//! Time-dependent Dijkstra.

use tracing::debug;

use crate::domain::StopId;
use crate::graph::ScheduleGraph;

use super::astar::ZeroHeuristic;
use super::config::SearchConfig;
use super::objective::Objective;
use super::path::reconstruct;
use super::relax::{Relaxation, SearchTree};
use super::search::{Itinerary, SearchError, ensure_known};

/// Costs and predecessors from `source` to every stop it can reach.
///
/// # Errors
///
/// Returns [`SearchError::UnknownStop`] if `source` is not in the graph.
pub fn dijkstra_tree<'g>(
    graph: &'g ScheduleGraph,
    source: &StopId,
    config: &SearchConfig,
) -> Result<SearchTree<'g>, SearchError> {
    ensure_known(graph, source)?;

    let tree = Relaxation {
        graph,
        objective: Objective::Time,
        heuristic: &ZeroHeuristic,
        config,
    }
    .run(source, None);

    debug!(
        source = %source,
        settled = tree.settled(),
        reached = tree.reached(),
        "Dijkstra tree complete"
    );

    Ok(tree)
}

/// Cheapest itinerary from `source` to `destination`.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::{Coordinates, LineId, ScheduleTime, StopId};
/// use transit_planner::graph::{ScheduleGraph, TripRecord};
/// use transit_planner::planner::{SearchConfig, dijkstra};
///
/// let record = |line: &str, from: &str, to: &str, dep: &str, arr: &str| TripRecord {
///     line: LineId::parse(line).unwrap(),
///     start: StopId::parse(from).unwrap(),
///     end: StopId::parse(to).unwrap(),
///     departure: ScheduleTime::parse(dep).unwrap(),
///     arrival: ScheduleTime::parse(arr).unwrap(),
///     start_location: Coordinates::new(51.1, 17.0),
///     end_location: Coordinates::new(51.1, 17.0),
/// };
///
/// let graph = ScheduleGraph::from_records(
///     &[
///         record("A", "Stop1", "Stop2", "08:00", "08:10"),
///         record("B", "Stop2", "Stop3", "08:20", "08:30"),
///     ],
///     ScheduleTime::parse("08:00").unwrap(),
/// )
/// .unwrap();
///
/// let itinerary = dijkstra(
///     &graph,
///     &StopId::parse("Stop1").unwrap(),
///     &StopId::parse("Stop3").unwrap(),
///     &SearchConfig::default(),
/// )
/// .unwrap();
///
/// // 10 ride + 10 wait + 1 change + 10 ride
/// assert_eq!(itinerary.cost, 31);
/// assert_eq!(itinerary.edges.len(), 2);
/// ```
pub fn dijkstra(
    graph: &ScheduleGraph,
    source: &StopId,
    destination: &StopId,
    config: &SearchConfig,
) -> Result<Itinerary, SearchError> {
    ensure_known(graph, source)?;
    ensure_known(graph, destination)?;

    let target = config.stop_at_destination.then_some(destination);
    let tree = Relaxation {
        graph,
        objective: Objective::Time,
        heuristic: &ZeroHeuristic,
        config,
    }
    .run(source, target);

    let itinerary = reconstruct(&tree, destination)?;

    debug!(
        source = %source,
        destination = %destination,
        cost = itinerary.cost,
        settled = itinerary.settled,
        edges = itinerary.edges.len(),
        "Dijkstra search complete"
    );

    Ok(itinerary)
}
