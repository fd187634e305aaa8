//! Search objectives.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown objective name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown objective {0:?}: expected \"t\" (time) or \"p\" (transfers)")]
pub struct InvalidObjective(pub String);

/// What a search minimizes.
///
/// # Examples
///
/// ```
/// use transit_planner::planner::Objective;
///
/// assert_eq!("t".parse::<Objective>().unwrap(), Objective::Time);
/// assert_eq!("p".parse::<Objective>().unwrap(), Objective::Transfers);
/// assert!("x".parse::<Objective>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    /// Minimize total cost: ride time, waiting time and transfer penalties.
    #[default]
    Time,
    /// Minimize the number of line changes first, then total cost.
    Transfers,
}

impl Objective {
    /// The single-letter mode code, "t" or "p".
    pub fn code(&self) -> &'static str {
        match self {
            Objective::Time => "t",
            Objective::Transfers => "p",
        }
    }
}

impl FromStr for Objective {
    type Err = InvalidObjective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "t" | "time" => Ok(Objective::Time),
            "p" | "transfers" => Ok(Objective::Transfers),
            other => Err(InvalidObjective(other.to_string())),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Time => f.write_str("time"),
            Objective::Transfers => f.write_str("transfers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_names() {
        assert_eq!("time".parse::<Objective>().unwrap(), Objective::Time);
        assert_eq!(" transfers ".parse::<Objective>().unwrap(), Objective::Transfers);
    }

    #[test]
    fn codes_roundtrip() {
        for objective in [Objective::Time, Objective::Transfers] {
            assert_eq!(objective.code().parse::<Objective>().unwrap(), objective);
        }
    }

    #[test]
    fn error_display() {
        let err = "q".parse::<Objective>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown objective \"q\": expected \"t\" (time) or \"p\" (transfers)"
        );
    }

    #[test]
    fn default_is_time() {
        assert_eq!(Objective::default(), Objective::Time);
    }
}
