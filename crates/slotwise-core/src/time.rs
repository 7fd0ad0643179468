use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use std::fmt::Display;
use thiserror::Error;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidDateTime,
    #[error("invalid time format: expected HH:MM")]
    InvalidTimeFormat,
    #[error("ambiguous local time: {0}")]
    AmbiguousLocalTime(String),
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_local_timestamp(input: &str) -> Result<i64, TimeParseError> {
    parse_timestamp_in(input, &Local)
}

/// Parses a user-supplied date or date-time as wall-clock time in `tz`.
/// Wall-clock times that do not map to exactly one instant are rejected.
pub fn parse_timestamp_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<i64, TimeParseError> {
    let naive = parse_naive(input)?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| TimeParseError::AmbiguousLocalTime(naive.to_string()))
}

/// Parses a date as stored on a campaign record, with browser `Date`
/// semantics: RFC 3339 keeps its offset, a bare `YYYY-MM-DD` is UTC midnight,
/// and a date-time without offset is wall-clock time in `tz`. Blank input is
/// an absent date.
pub fn parse_record_timestamp<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<Option<i64>, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.timestamp()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or(TimeParseError::InvalidDate)?;
        return Ok(Some(midnight.and_utc().timestamp()));
    }

    let naive = parse_naive(trimmed)?;
    resolve_local(tz, naive)
        .map(|dt| Some(dt.timestamp()))
        .ok_or(TimeParseError::InvalidDate)
}

pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or(TimeParseError::InvalidTimeFormat)
}

/// Maps a wall-clock time onto an instant the way a browser `Date` does:
/// the earlier instant inside a fold, one hour later inside a gap.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}

pub fn format_timestamp<Tz>(ts: i64, tz: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(tz)
        .format(format)
        .to_string()
}

fn parse_naive(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .ok_or(TimeParseError::InvalidDate);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or(TimeParseError::InvalidDateTime)
}
