//! Scheduled transit journey planner.
//!
//! Answers: "leaving this stop at this time, what is the cheapest way to
//! reach that one?" over a timetable of individual vehicle trips, with
//! time-dependent Dijkstra and A* searches.

pub mod domain;
pub mod graph;
pub mod ingest;
pub mod planner;
pub mod report;
