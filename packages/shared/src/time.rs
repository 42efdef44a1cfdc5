//! Time helpers shared between server components.

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Utc};

/// Format used for request-log timestamps (`2025-01-01 21:15:03.120443`).
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Get current Unix timestamp (milliseconds, UTC)
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Get the current local wall-clock date and time of the server.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339()
}

/// Format a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a `HH:MM` (or `HH:MM:SS`) time of day.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| format!("invalid time of day '{value}' (expected HH:MM): {e}"))
}
