//! Game record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::{Event, TranscriptEntry};
use crate::stats::StatTable;

pub const UNKNOWN_OPPONENT: &str = "Unknown";
pub const UNKNOWN_DATE: &str = "N/A";

/// A persisted game
///
/// `formatted_events` and `stats` are derived from `events_list` and are
/// rebuilt whenever the list changes. `version` increments on every stored
/// update and guards against lost updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub team_id: i64,
    pub opponent: String,
    pub date: String,
    pub events_list: Vec<Event>,
    pub formatted_events: String,
    pub stats: StatTable,
    pub transcripts: Vec<TranscriptEntry>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// A fresh game with no events
    ///
    /// Blank opponent/date fall back to placeholders.
    pub fn new(team_id: i64, opponent: &str, date: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            opponent: non_blank(opponent, UNKNOWN_OPPONENT),
            date: non_blank(date, UNKNOWN_DATE),
            events_list: Vec::new(),
            formatted_events: String::new(),
            stats: StatTable::default(),
            transcripts: Vec::new(),
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Short label used in page titles and lists
    pub fn label(&self) -> String {
        format!("vs. {} ({})", self.opponent, self.date)
    }
}

fn non_blank(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
