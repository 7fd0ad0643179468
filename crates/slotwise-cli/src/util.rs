use anyhow::Result;
use chrono::Local;
use slotwise_core::time::{format_timestamp, now_utc, parse_local_timestamp};

pub const NO_ACTIVATION_LABEL: &str = "No upcoming activation";

pub fn resolve_now(raw: Option<&str>) -> Result<i64> {
    match raw {
        Some(value) => Ok(parse_local_timestamp(value)?),
        None => Ok(now_utc()),
    }
}

pub fn format_activation(next: Option<i64>, format: &str) -> String {
    match next {
        Some(ts) => format_timestamp(ts, &Local, format),
        None => NO_ACTIVATION_LABEL.to_string(),
    }
}

pub fn format_optional_date(ts: Option<i64>, format: &str) -> String {
    ts.map(|value| format_timestamp(value, &Local, format))
        .unwrap_or_else(|| "-".to_string())
}
