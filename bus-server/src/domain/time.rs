//! Clock times for bus schedules.
//!
//! Datasets and requests carry times as "HH:MM" strings. Every component
//! works in minutes since midnight internally; `ClockTime` is the single
//! place where the two representations are converted.
//!
//! Arrival estimates can run past midnight (a 23:55 departure reaching its
//! fourth stop), so a `ClockTime` may hold values of 1440 or more. Those
//! display modulo 24 hours.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

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

/// A time of day, stored as minutes since midnight.
///
/// # Examples
///
/// ```
/// use bus_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("08:30").unwrap();
/// assert_eq!(t.minutes(), 510);
/// assert_eq!(t.to_string(), "08:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClockTime(u32);

impl ClockTime {
    /// 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Create a time from minutes since midnight.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0830").is_err());
    /// assert!(ClockTime::parse_hhmm("8:30").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self(hour * 60 + minute))
    }

    /// Convert a wall-clock time, dropping seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Hour of day (0-23), wrapping past midnight.
    pub fn hour(self) -> u32 {
        (self.0 / 60) % 24
    }

    /// Minute of the hour (0-59).
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// True when the value lies past the end of the service day.
    pub fn is_next_day(self) -> bool {
        self.0 >= MINUTES_PER_DAY
    }

    /// This time plus a number of minutes.
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Signed minutes from `earlier` to `self`.
    ///
    /// Negative when `earlier` is actually later.
    pub fn minutes_since(self, earlier: ClockTime) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_next_day() {
            write!(f, "ClockTime({:02}:{:02}+1)", self.hour(), self.minute())
        } else {
            write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(t("00:00").minutes(), 0);
        assert_eq!(t("08:00").minutes(), 480);
        assert_eq!(t("23:59").minutes(), 1439);

        let time = t("14:30");
        assert_eq!(time.hour(), 14);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn reject_invalid_format() {
        assert!(ClockTime::parse_hhmm("").is_err());
        assert!(ClockTime::parse_hhmm("1430").is_err());
        assert!(ClockTime::parse_hhmm("14-30").is_err());
        assert!(ClockTime::parse_hhmm("14:3").is_err());
        assert!(ClockTime::parse_hhmm("14:300").is_err());
        assert!(ClockTime::parse_hhmm("ab:cd").is_err());
        assert!(ClockTime::parse_hhmm(" 8:30").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(ClockTime::parse_hhmm("24:00").is_err());
        assert!(ClockTime::parse_hhmm("12:60").is_err());
        assert!(ClockTime::parse_hhmm("99:99").is_err());
    }

    #[test]
    fn error_display() {
        let err = ClockTime::parse_hhmm("25:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");
    }

    #[test]
    fn display_wraps_past_midnight() {
        let late = t("23:50").plus_minutes(15);
        assert!(late.is_next_day());
        assert_eq!(late.to_string(), "00:05");
        assert_eq!(format!("{late:?}"), "ClockTime(00:05+1)");
    }

    #[test]
    fn minutes_since_is_signed() {
        assert_eq!(t("08:00").minutes_since(t("07:55")), 5);
        assert_eq!(t("07:55").minutes_since(t("08:00")), -5);
        assert_eq!(t("08:00").minutes_since(t("08:00")), 0);
    }

    #[test]
    fn from_naive_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(9, 41, 59).unwrap();
        assert_eq!(ClockTime::from_naive_time(time), t("09:41"));
    }

    #[test]
    fn ordering_follows_minutes() {
        assert!(t("07:59") < t("08:00"));
        assert!(t("23:59") < t("23:59").plus_minutes(1));
    }

    proptest! {
        #[test]
        fn hhmm_round_trip(hour in 0u32..24, minute in 0u32..60) {
            let s = format!("{hour:02}:{minute:02}");
            let parsed = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(parsed.minutes(), hour * 60 + minute);
            prop_assert_eq!(parsed.to_string(), s);
        }

        #[test]
        fn minutes_round_trip(minutes in 0u32..MINUTES_PER_DAY) {
            let time = ClockTime::from_minutes(minutes);
            prop_assert_eq!(ClockTime::parse_hhmm(&time.to_string()).unwrap(), time);
        }

        #[test]
        fn parse_never_panics(s in "\\PC{0,8}") {
            let _ = ClockTime::parse_hhmm(&s);
        }
    }
}
