//! Domain types for the transit planner.
//!
//! This module contains the core value types: stops, lines, schedule times
//! and the scheduled edges that connect stops. All types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod edge;
mod line;
mod stop;
mod time;

pub use edge::Edge;
pub use line::{InvalidLineId, LineId};
pub use stop::{Coordinates, InvalidStopId, Stop, StopId};
pub use time::{SECONDS_PER_DAY, ScheduleTime, TimeError};
