//! Event log formatting
//!
//! Renders the chronological event list as a newest-first text block, one
//! line per event: `[Mar 05, 02:30 PM] Field Block by Alex Kim!`

use crate::events::Event;
use crate::time;

/// Placeholder shown when a stored timestamp cannot be parsed
pub const NO_TIME: &str = "No Time";

/// Format a list of events, most recent first
pub fn format_events(events: &[Event]) -> String {
    let lines: Vec<String> = events.iter().map(format_event).collect();
    lines.into_iter().rev().collect::<Vec<_>>().join("\n")
}

/// Format one event line
pub fn format_event(event: &Event) -> String {
    let ts = time::display_stamp(&event.timestamp).unwrap_or_else(|| NO_TIME.to_string());
    format!("[{}] {} by {}!", ts, action_title(&event.action), event.player)
}

/// `ejection_committed` → `Ejection Committed`
pub fn action_title(action: &str) -> String {
    action
        .replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
