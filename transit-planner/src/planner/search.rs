//! Query validation and dispatch.
//!
//! A [`Planner`] binds a graph to a configuration and answers [`Query`]s
//! with either engine. Queries must use the reference instant the graph was
//! built for, since every edge offset is measured from it.

use crate::domain::{Edge, ScheduleTime, StopId};
use crate::graph::ScheduleGraph;

use super::astar::astar;
use super::config::SearchConfig;
use super::dijkstra::dijkstra;
use super::objective::Objective;

/// Error from journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No chain of edges leads from `from` to `to` after the reference instant
    #[error("no connection from {from} to {to}")]
    Unreachable { from: StopId, to: StopId },

    /// Stop name not present in the graph
    #[error("unknown stop: {0}")]
    UnknownStop(StopId),

    /// The graph was built for a different reference instant
    #[error("graph is built for reference {graph}, query asks for {query}")]
    ReferenceMismatch {
        graph: ScheduleTime,
        query: ScheduleTime,
    },
}

/// Fail with [`SearchError::UnknownStop`] if `stop` is not in the graph.
pub(crate) fn ensure_known(graph: &ScheduleGraph, stop: &StopId) -> Result<(), SearchError> {
    if graph.contains_stop(stop) {
        Ok(())
    } else {
        Err(SearchError::UnknownStop(stop.clone()))
    }
}

/// A journey request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub source: StopId,
    pub destination: StopId,
    /// The moment the rider is ready to leave the source.
    pub reference: ScheduleTime,
    pub objective: Objective,
}

impl Query {
    /// Create a new query.
    pub fn new(
        source: StopId,
        destination: StopId,
        reference: ScheduleTime,
        objective: Objective,
    ) -> Self {
        Self {
            source,
            destination,
            reference,
            objective,
        }
    }

    /// Validate the query against a graph.
    pub fn validate(&self, graph: &ScheduleGraph) -> Result<(), SearchError> {
        if self.reference != graph.reference() {
            return Err(SearchError::ReferenceMismatch {
                graph: graph.reference(),
                query: self.reference,
            });
        }
        ensure_known(graph, &self.source)?;
        ensure_known(graph, &self.destination)
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// Ride time, waiting time and transfer penalties, in minutes.
    pub cost: u32,

    /// Edges from source to destination, in travel order.
    pub edges: Vec<Edge>,

    /// Number of stops the search expanded.
    pub settled: usize,
}

impl Itinerary {
    /// Number of consecutive edge pairs that use different lines.
    pub fn change_count(&self) -> usize {
        crate::report::change_count(&self.edges)
    }

    /// Returns true if source and destination were the same stop.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Dijkstra,
    AStar,
}

/// Journey planner over one schedule graph.
pub struct Planner<'a> {
    graph: &'a ScheduleGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a ScheduleGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Plan with the given engine.
    pub fn plan(&self, query: &Query, engine: Engine) -> Result<Itinerary, SearchError> {
        match engine {
            Engine::Dijkstra => self.dijkstra(query),
            Engine::AStar => self.astar(query),
        }
    }

    /// Time-dependent Dijkstra. Always minimizes cost; the query's
    /// objective is not consulted.
    pub fn dijkstra(&self, query: &Query) -> Result<Itinerary, SearchError> {
        query.validate(self.graph)?;
        dijkstra(self.graph, &query.source, &query.destination, self.config)
    }

    /// A* for the query's objective.
    pub fn astar(&self, query: &Query) -> Result<Itinerary, SearchError> {
        query.validate(self.graph)?;
        astar(
            self.graph,
            &query.source,
            &query.destination,
            query.objective,
            self.config,
        )
    }
}
