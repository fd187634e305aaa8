//! Graph construction errors.

use crate::domain::{LineId, StopId};

/// Errors that make a batch of records unusable as a schedule graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A connection references a stop that was never declared
    #[error("line {line} references undeclared stop {stop}")]
    UndeclaredStop { line: LineId, stop: StopId },

    /// A connection starts and ends at the same stop
    #[error("line {line} has an edge from {stop} to itself")]
    SelfLoop { line: LineId, stop: StopId },

    /// A stop's coordinates are not a valid WGS84 position
    #[error("stop {stop} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { stop: StopId, lat: f64, lon: f64 },
}
