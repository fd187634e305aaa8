//! Timetable ingestion error types.

use crate::domain::{InvalidLineId, InvalidStopId, StopId, TimeError};

/// Errors that abort loading a timetable file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV framing is broken (for example, a malformed header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a single row was skipped.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// Wrong field count or a coordinate that is not a number
    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),

    #[error(transparent)]
    Line(#[from] InvalidLineId),

    #[error(transparent)]
    Stop(#[from] InvalidStopId),

    #[error("trip starts and ends at {0}")]
    SelfLoop(StopId),

    #[error("invalid coordinates for {stop}: ({lat}, {lon})")]
    InvalidCoordinates { stop: StopId, lat: f64, lon: f64 },

    #[error("{field}: {error}")]
    Time {
        field: &'static str,
        #[source]
        error: TimeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleTime;

    #[test]
    fn error_display() {
        let err = IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(err.to_string(), "I/O error: no such file");

        let err = RowError::Time {
            field: "departure_time",
            error: ScheduleTime::parse("8").unwrap_err(),
        };
        assert!(err.to_string().starts_with("departure_time: invalid time"));

        let err = RowError::InvalidCoordinates {
            stop: StopId::parse("Prusa").unwrap(),
            lat: 95.0,
            lon: 17.0,
        };
        assert_eq!(err.to_string(), "invalid coordinates for Prusa: (95, 17)");
    }
}
