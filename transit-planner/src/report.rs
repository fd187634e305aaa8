//! Summaries of planned itineraries.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{Edge, ScheduleTime};

/// Number of places along `path` where the next edge is on a different line.
pub fn change_count(path: &[Edge]) -> usize {
    path.windows(2)
        .filter(|pair| pair[0].line() != pair[1].line())
        .count()
}

/// Headline figures for an itinerary.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::{Edge, LineId, ScheduleTime, StopId};
/// use transit_planner::report::TripSummary;
///
/// let reference = ScheduleTime::parse("08:00").unwrap();
/// let edge = |line: &str, from: &str, to: &str, dep: &str, arr: &str| {
///     Edge::new(
///         StopId::parse(from).unwrap(),
///         StopId::parse(to).unwrap(),
///         LineId::parse(line).unwrap(),
///         ScheduleTime::parse(dep).unwrap(),
///         ScheduleTime::parse(arr).unwrap(),
///         reference,
///     )
/// };
///
/// let path = [
///     edge("A", "Stop1", "Stop2", "08:00", "08:10"),
///     edge("B", "Stop2", "Stop3", "08:20", "08:30"),
/// ];
/// let summary = TripSummary::from_path(&path, reference);
///
/// assert_eq!(
///     summary.to_string(),
///     "Whole trip will take 30 minutes across 2 lines and 1 line changes"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripSummary {
    /// Minutes from the reference instant to the final arrival.
    pub total_minutes: u32,
    pub distinct_lines: usize,
    pub line_changes: usize,
}

impl TripSummary {
    /// Summarize `path` as travelled from `reference`.
    ///
    /// An empty path summarizes to all zeroes.
    pub fn from_path(path: &[Edge], reference: ScheduleTime) -> Self {
        let Some(last) = path.last() else {
            return Self::default();
        };

        // Measure against the caller's reference, not the graph's
        let last = last.rebased(reference);
        let lines: BTreeSet<_> = path.iter().map(Edge::line).collect();

        Self {
            total_minutes: last.offset() + last.ride_cost(),
            distinct_lines: lines.len(),
            line_changes: change_count(path),
        }
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Whole trip will take {} minutes across {} lines and {} line changes",
            self.total_minutes, self.distinct_lines, self.line_changes
        )
    }
}
