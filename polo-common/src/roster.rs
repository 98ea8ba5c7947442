//! Team roster types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A rostered player
///
/// Only `name` matters to the pipeline. Everything else (cap number, position,
/// year, ...) is kept as an opaque profile and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: Map::new(),
        }
    }

    /// Attach an opaque profile field
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.profile.insert(key.to_string(), value.into());
        self
    }

    /// Profile field rendered for display (strings unquoted, null/missing as None)
    pub fn field_text(&self, key: &str) -> Option<String> {
        match self.profile.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn cap_number(&self) -> Option<String> {
        self.field_text("cap_number")
    }

    pub fn position(&self) -> Option<String> {
        self.field_text("position")
    }
}

/// Ordered collection of a team's players with exact-name lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster; later duplicates of a name are dropped
    pub fn new(players: Vec<Player>) -> Self {
        let mut seen = HashSet::new();
        let players = players
            .into_iter()
            .filter(|p| {
                let fresh = seen.insert(p.name.clone());
                if !fresh {
                    tracing::warn!(player = %p.name, "Duplicate roster name ignored");
                }
                fresh
            })
            .collect();
        Self { players }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Player::new).collect())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player names in roster order
    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    /// Exact, case-sensitive name lookup
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
