//! Clock time handling.
//!
//! Timetables and queries carry times as "HH:MM" strings. The planner only
//! ever reasons about a single service day, so times are plain
//! [`NaiveTime`] values; arithmetic that runs past midnight wraps.

use chrono::{Duration, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time in strict "HH:MM" format.
///
/// # Examples
///
/// ```
/// use metro_server::domain::parse_hhmm;
///
/// let t = parse_hhmm("07:05").unwrap();
/// assert_eq!(metro_server::domain::format_hhmm(t), "07:05");
///
/// assert!(parse_hhmm("7:05").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// assert!(parse_hhmm("0705").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
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

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Format a time as "HH:MM", dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Whole minutes from `from` forward to `to` on the same day.
///
/// Partial minutes are truncated. Returns a negative value when `to` is
/// earlier than `from`.
pub fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    to.signed_duration_since(from).num_minutes()
}

/// Add whole minutes to a clock time, wrapping past midnight.
pub fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    time + Duration::minutes(i64::from(minutes))
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
