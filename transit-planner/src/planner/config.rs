//! Search configuration for the planner.

/// Configuration parameters for journey search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cost charged for boarding a different line than the one the rider
    /// arrived on (minutes).
    pub transfer_penalty_mins: u32,

    /// Stop a point-to-point search as soon as the destination is settled.
    /// Does not change the result, only the amount of work.
    pub stop_at_destination: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_penalty_mins: u32, stop_at_destination: bool) -> Self {
        Self {
            transfer_penalty_mins,
            stop_at_destination,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_mins: 1,
            stop_at_destination: true,
        }
    }
}
