use chrono::Weekday;
use std::fmt;

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("Sunday", Weekday::Sun),
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
];

pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let trimmed = raw.trim();
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, day)| *day)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Weekday of a schedule entry. Labels that do not name a weekday are kept
/// so they can be shown, but never produce an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleDay {
    Day(Weekday),
    Unrecognized(String),
}

impl ScheduleDay {
    pub fn parse(raw: &str) -> Self {
        match parse_weekday(raw) {
            Some(day) => Self::Day(day),
            None => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Self::Day(day) => Some(*day),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Day(_))
    }
}

impl fmt::Display for ScheduleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => f.write_str(weekday_name(*day)),
            Self::Unrecognized(label) => f.write_str(label),
        }
    }
}
