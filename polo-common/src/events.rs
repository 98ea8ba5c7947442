//! Game events and the candidate decode/sanitize step
//!
//! The extraction service returns untrusted JSON. Each array item decodes into
//! a [`Candidate`]: either a well-formed record or a malformed leftover. Only
//! well-formed records survive [`sanitize`], which stamps them with the current
//! time. Roster and vocabulary checks happen later, at aggregation time, so an
//! event naming an unknown player is still kept and displayed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::time;

/// A stamped game event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub player: String,
    pub action: String,
    pub timestamp: String,
}

impl Event {
    pub fn new(
        player: impl Into<String>,
        action: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            action: action.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Decode a persisted event, `None` when the entry is not a usable record
    ///
    /// Stored rows may predate stamping, so a missing timestamp becomes empty.
    pub fn from_stored(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let player = obj.get("player")?.as_str()?;
        let action = obj.get("action")?.as_str()?;
        let timestamp = obj
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self::new(player, action, timestamp))
    }
}

/// An extracted event before stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub player: String,
    pub action: String,
}

impl RawEvent {
    pub fn new(player: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            action: action.into(),
        }
    }

    pub fn stamp(self, at: NaiveDateTime) -> Event {
        Event {
            player: self.player,
            action: self.action,
            timestamp: time::stamp(at),
        }
    }
}

/// One decoded item of an extraction response
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// A key-value record with string `player` and `action`
    Event(RawEvent),
    /// Anything else; kept only so it can be logged and counted
    Malformed(Value),
}

impl Candidate {
    pub fn decode(value: Value) -> Self {
        let fields = value.as_object().and_then(|obj| {
            let player = obj.get("player")?.as_str()?;
            let action = obj.get("action")?.as_str()?;
            Some(RawEvent::new(player, action))
        });

        match fields {
            Some(raw) => Candidate::Event(raw),
            None => Candidate::Malformed(value),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Candidate::Malformed(_))
    }
}

/// Decode every item of a parsed response array
pub fn decode_candidates(values: Vec<Value>) -> Vec<Candidate> {
    values.into_iter().map(Candidate::decode).collect()
}

/// Drop malformed candidates and stamp the rest with the current time
pub fn sanitize(candidates: Vec<Candidate>) -> Vec<Event> {
    sanitize_at(candidates, time::now())
}

/// [`sanitize`] with an explicit clock
pub fn sanitize_at(candidates: Vec<Candidate>, at: NaiveDateTime) -> Vec<Event> {
    let mut dropped = 0usize;
    let events: Vec<Event> = candidates
        .into_iter()
        .filter_map(|candidate| match candidate {
            Candidate::Event(raw) => Some(raw.stamp(at)),
            Candidate::Malformed(value) => {
                dropped += 1;
                debug!(candidate = %value, "Dropping malformed extraction candidate");
                None
            }
        })
        .collect();

    if dropped > 0 {
        debug!(kept = events.len(), dropped, "Sanitized extraction candidates");
    }

    events
}

/// Decode a persisted event list, skipping unusable entries
pub fn events_from_stored(values: &[Value]) -> Vec<Event> {
    values.iter().filter_map(Event::from_stored).collect()
}

/// Audit record of one raw commentary submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub timestamp: String,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            timestamp: time::stamp(at),
            text: text.into(),
        }
    }
}
