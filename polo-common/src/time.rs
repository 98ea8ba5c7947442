//! Timestamp utilities
//!
//! Event timestamps are stored as fixed-width local time strings so that plain
//! string ordering matches chronological ordering.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Storage format for event and transcript timestamps
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Accepts stored timestamps with or without the fractional part
const EVENT_TIMESTAMP_PARSE: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Display format used in the event log
pub const DISPLAY_FORMAT: &str = "%b %d, %I:%M %p";

/// Get current local wall-clock time, truncated to storage precision
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Render a timestamp in storage format
pub fn stamp(at: NaiveDateTime) -> String {
    at.format(EVENT_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp
pub fn parse_stamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), EVENT_TIMESTAMP_PARSE).ok()
}

/// Reformat a stored timestamp for display, `None` when it does not parse
pub fn display_stamp(s: &str) -> Option<String> {
    parse_stamp(s).map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}
