//! Schedule graph construction.
//!
//! Records are collected first and only turned into edges in
//! [`GraphBuilder::build`], once the reference instant is known. That is the
//! single place where edge offsets are computed and buckets are sorted.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::domain::{Coordinates, Edge, LineId, ScheduleTime, Stop, StopId};

use super::GraphError;
use super::ScheduleGraph;

/// A normalized timetable row: one vehicle trip between two stops, with
/// the locations of both stops.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub line: LineId,
    pub start: StopId,
    pub end: StopId,
    pub departure: ScheduleTime,
    pub arrival: ScheduleTime,
    pub start_location: Coordinates,
    pub end_location: Coordinates,
}

/// A scheduled connection between two stops declared separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub line: LineId,
    pub start: StopId,
    pub end: StopId,
    pub departure: ScheduleTime,
    pub arrival: ScheduleTime,
}

impl From<&TripRecord> for Connection {
    fn from(record: &TripRecord) -> Self {
        Self {
            line: record.line.clone(),
            start: record.start.clone(),
            end: record.end.clone(),
            departure: record.departure,
            arrival: record.arrival,
        }
    }
}

/// Collects stops and connections before building a [`ScheduleGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    stops: BTreeMap<StopId, Stop>,
    connections: Vec<Connection>,
    /// Redeclarations ignored because their coordinates differed, per stop.
    conflicts: BTreeMap<StopId, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stop. The first declaration of a name wins.
    pub fn declare_stop(&mut self, stop: Stop) -> &mut Self {
        match self.stops.get(stop.id()) {
            Some(existing) if existing.location() != stop.location() => {
                trace!(
                    stop = %stop.id(),
                    kept = ?existing.location(),
                    ignored = ?stop.location(),
                    "conflicting coordinates for stop, keeping the first"
                );
                *self.conflicts.entry(stop.id().clone()).or_default() += 1;
            }
            Some(_) => {}
            None => {
                self.stops.insert(stop.id().clone(), stop);
            }
        }
        self
    }

    /// Number of declarations ignored so far because they gave a known stop
    /// different coordinates.
    pub fn coordinate_conflicts(&self) -> usize {
        self.conflicts.values().sum()
    }

    /// Add a connection between stops that are declared separately.
    pub fn add_connection(&mut self, connection: Connection) -> &mut Self {
        self.connections.push(connection);
        self
    }

    /// Add a timetable row, declaring both of its stops.
    pub fn add_record(&mut self, record: &TripRecord) -> &mut Self {
        self.declare_stop(Stop::new(record.start.clone(), record.start_location));
        self.declare_stop(Stop::new(record.end.clone(), record.end_location));
        self.add_connection(Connection::from(record))
    }

    /// Add many timetable rows.
    pub fn add_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a TripRecord>,
    ) -> &mut Self {
        for record in records {
            self.add_record(record);
        }
        self
    }

    /// Validate everything collected and build the graph for `reference`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found: invalid stop coordinates, a
    /// connection touching an undeclared stop, or a connection from a stop
    /// to itself.
    pub fn build(self, reference: ScheduleTime) -> Result<ScheduleGraph, GraphError> {
        if let Some((first, _)) = self.conflicts.first_key_value() {
            warn!(
                ignored = self.coordinate_conflicts(),
                stops = self.conflicts.len(),
                first = %first,
                "conflicting coordinates for stops, kept the first declaration of each"
            );
        }

        for stop in self.stops.values() {
            let location = stop.location();
            if !location.is_valid() {
                return Err(GraphError::InvalidCoordinates {
                    stop: stop.id().clone(),
                    lat: location.lat,
                    lon: location.lon,
                });
            }
        }

        let mut edges = Vec::with_capacity(self.connections.len());
        for connection in self.connections {
            for stop in [&connection.start, &connection.end] {
                if !self.stops.contains_key(stop) {
                    return Err(GraphError::UndeclaredStop {
                        line: connection.line.clone(),
                        stop: stop.clone(),
                    });
                }
            }
            if connection.start == connection.end {
                return Err(GraphError::SelfLoop {
                    line: connection.line,
                    stop: connection.start,
                });
            }

            edges.push(Edge::new(
                connection.start,
                connection.end,
                connection.line,
                connection.departure,
                connection.arrival,
                reference,
            ));
        }

        let graph = ScheduleGraph::from_parts(reference, self.stops, edges);

        debug!(
            stops = graph.stop_count(),
            edges = graph.edge_count(),
            lines = graph.lines().count(),
            reference = %reference,
            "schedule graph built"
        );

        Ok(graph)
    }
}
