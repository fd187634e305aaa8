//! Scheduled trip segments.

use std::fmt;

use super::{LineId, ScheduleTime, StopId};

/// One scheduled vehicle trip segment between two stops on one line.
///
/// Both the ride cost and the offset from the graph's reference instant are
/// computed at construction, so an `Edge` never changes after it is built.
/// Rebuilding against another reference instant produces new edges.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::{Edge, LineId, ScheduleTime, StopId};
///
/// let edge = Edge::new(
///     StopId::parse("Stop1").unwrap(),
///     StopId::parse("Stop2").unwrap(),
///     LineId::parse("A").unwrap(),
///     ScheduleTime::parse("23:50").unwrap(),
///     ScheduleTime::parse("00:05").unwrap(),
///     ScheduleTime::parse("23:00").unwrap(),
/// );
///
/// assert_eq!(edge.ride_cost(), 15);
/// assert_eq!(edge.offset(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    start: StopId,
    stop: StopId,
    line: LineId,
    departure: ScheduleTime,
    arrival: ScheduleTime,
    /// Ride duration in minutes.
    ride_cost: u32,
    /// Minutes from the reference instant to departure.
    offset: u32,
}

impl Edge {
    /// Create an edge, measuring its departure against `reference`.
    pub fn new(
        start: StopId,
        stop: StopId,
        line: LineId,
        departure: ScheduleTime,
        arrival: ScheduleTime,
        reference: ScheduleTime,
    ) -> Self {
        Self {
            ride_cost: departure.minutes_until(arrival),
            offset: reference.minutes_until(departure),
            start,
            stop,
            line,
            departure,
            arrival,
        }
    }

    pub fn start(&self) -> &StopId {
        &self.start
    }

    pub fn stop(&self) -> &StopId {
        &self.stop
    }

    pub fn line(&self) -> &LineId {
        &self.line
    }

    pub fn departure(&self) -> ScheduleTime {
        self.departure
    }

    pub fn arrival(&self) -> ScheduleTime {
        self.arrival
    }

    /// Ride duration in minutes, wrapping past midnight.
    pub fn ride_cost(&self) -> u32 {
        self.ride_cost
    }

    /// Minutes from the reference instant until this edge departs.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// A copy of this edge measured against a different reference instant.
    pub fn rebased(&self, reference: ScheduleTime) -> Self {
        Self {
            offset: reference.minutes_until(self.departure),
            ..self.clone()
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} {} -> {} {}",
            self.line, self.start, self.departure, self.stop, self.arrival
        )
    }
}
