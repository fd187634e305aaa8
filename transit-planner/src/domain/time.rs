//! Schedule time handling.
//!
//! Timetables give times as "HH:MM:SS" strings within a single service day.
//! Everything in this crate lives on one 24-hour cycle: a time that is
//! numerically earlier than another is taken to be on the following day
//! when computing a difference.

use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Seconds in one service day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time within one service day.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("08:05:30").unwrap();
/// assert_eq!(t.to_string(), "08:05:30");
///
/// // Times past midnight are folded back onto the same cycle
/// let late = ScheduleTime::parse("25:10:00").unwrap();
/// assert_eq!(late.to_string(), "01:10:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleTime(NaiveTime);

impl ScheduleTime {
    /// Create a time from hour, minute and second components.
    ///
    /// Hours of 24 or more are normalized modulo 24.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour % 24, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse a time from "H:MM", "HH:MM" or "HH:MM:SS".
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse("7:45").is_ok());
    /// assert!(ScheduleTime::parse("17:00:00").is_ok());
    /// assert!(ScheduleTime::parse("17").is_err());
    /// assert!(ScheduleTime::parse("17:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');

        let hour = parts
            .next()
            .and_then(parse_digits)
            .ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = match parts.next() {
            Some(m) if m.len() == 2 => {
                parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?
            }
            Some(_) => return Err(TimeError::new("minutes must be two digits")),
            None => return Err(TimeError::new("expected HH:MM or HH:MM:SS format")),
        };
        let second = match parts.next() {
            Some(sec) if sec.len() == 2 => {
                parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?
            }
            Some(_) => return Err(TimeError::new("seconds must be two digits")),
            None => 0,
        };

        if parts.next().is_some() {
            return Err(TimeError::new("too many components"));
        }

        Self::from_hms(hour, minute, second)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// Whole minutes from `self` until `later`, wrapping past midnight.
    ///
    /// If `later` is numerically earlier than `self`, it is taken to be on
    /// the next day. Seconds are floored to minutes in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::ScheduleTime;
    ///
    /// let dep = ScheduleTime::parse("23:50:00").unwrap();
    /// let arr = ScheduleTime::parse("00:05:00").unwrap();
    /// assert_eq!(dep.minutes_until(arr), 15);
    /// assert_eq!(arr.minutes_until(dep), 1425);
    /// ```
    pub fn minutes_until(&self, later: ScheduleTime) -> u32 {
        let start = self.seconds_from_midnight();
        let end = later.seconds_from_midnight();
        let seconds = if start > end {
            SECONDS_PER_DAY - (start - end)
        } else {
            end - start
        };
        seconds / 60
    }

    /// Returns the underlying `NaiveTime`.
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for ScheduleTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }
}

impl FromStr for ScheduleTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse one or two ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ScheduleTime {
        ScheduleTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let time = t("00:00");
        assert_eq!((time.hour(), time.minute(), time.second()), (0, 0, 0));

        let time = t("23:59:59");
        assert_eq!((time.hour(), time.minute(), time.second()), (23, 59, 59));

        let time = t("7:05");
        assert_eq!((time.hour(), time.minute()), (7, 5));
    }

    #[test]
    fn parse_invalid_format() {
        assert!(ScheduleTime::parse("").is_err());
        assert!(ScheduleTime::parse("1430").is_err());
        assert!(ScheduleTime::parse("14:3").is_err());
        assert!(ScheduleTime::parse("14:30:0").is_err());
        assert!(ScheduleTime::parse("14:30:00:00").is_err());
        assert!(ScheduleTime::parse("ab:cd").is_err());
        assert!(ScheduleTime::parse("123:00").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ScheduleTime::parse("12:60").is_err());
        assert!(ScheduleTime::parse("12:00:60").is_err());
    }

    #[test]
    fn hours_past_midnight_wrap() {
        assert_eq!(t("24:00:00"), t("00:00:00"));
        assert_eq!(t("26:15:00"), t("02:15:00"));
    }

    #[test]
    fn display_format() {
        assert_eq!(t("9:05").to_string(), "09:05:00");
        assert_eq!(format!("{:?}", t("17:00")), "ScheduleTime(17:00:00)");
    }

    #[test]
    fn minutes_same_day() {
        assert_eq!(t("08:00").minutes_until(t("08:10")), 10);
        assert_eq!(t("08:00").minutes_until(t("08:00")), 0);
        // Seconds are floored
        assert_eq!(t("08:00:00").minutes_until(t("08:01:59")), 1);
    }

    #[test]
    fn minutes_wrap_past_midnight() {
        assert_eq!(t("23:50").minutes_until(t("00:05")), 15);
        assert_eq!(t("17:00").minutes_until(t("16:59")), 1439);
    }

    #[test]
    fn ordering() {
        assert!(t("10:00") < t("11:00"));
        assert!(t("00:00") < t("23:59"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60, second in 0u32..60) -> ScheduleTime {
            ScheduleTime::from_hms(hour, minute, second).unwrap()
        }
    }

    proptest! {
        /// Display then parse returns the original time
        #[test]
        fn display_parse_roundtrip(time in valid_time()) {
            prop_assert_eq!(ScheduleTime::parse(&time.to_string()).unwrap(), time);
        }

        /// A wrapped difference always stays within one day
        #[test]
        fn minutes_until_within_day(a in valid_time(), b in valid_time()) {
            prop_assert!(a.minutes_until(b) < 24 * 60);
        }

        /// Going forward and back covers a whole day (up to flooring)
        #[test]
        fn forward_and_back_cover_day(a in valid_time(), b in valid_time()) {
            let there = a.minutes_until(b);
            let back = b.minutes_until(a);
            if a == b {
                prop_assert_eq!(there + back, 0);
            } else {
                prop_assert!(there + back == 24 * 60 || there + back == 24 * 60 - 1);
            }
        }

        /// Hours beyond 24 fold back onto the cycle
        #[test]
        fn hour_normalization(hour in 0u32..48, minute in 0u32..60) {
            let time = ScheduleTime::from_hms(hour, minute, 0).unwrap();
            prop_assert_eq!(time.hour(), hour % 24);
        }
    }
}
