//! Line identifier type.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line identifier: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// A line or route identifier, such as "A", "17" or "N4".
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(Arc<str>);

impl LineId {
    /// Parse a line identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }
        Ok(Self(Arc::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.as_str())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(LineId::parse("A").unwrap().as_str(), "A");
        assert_eq!(LineId::parse(" 17 ").unwrap().as_str(), "17");
    }

    #[test]
    fn reject_empty() {
        assert!(LineId::parse("").is_err());
        assert!(LineId::parse("  ").is_err());
    }

    #[test]
    fn display_and_debug() {
        let line = LineId::parse("N4").unwrap();
        assert_eq!(line.to_string(), "N4");
        assert_eq!(format!("{:?}", line), "LineId(N4)");
    }
}
