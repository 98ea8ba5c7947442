//! Stat category vocabulary
//!
//! The ordered set of statistic labels an event action may take. Built once at
//! startup and handed to every aggregation and extraction call.

use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Water polo statistic labels, in display order
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "goal",
    "assist",
    "shot",
    "steal",
    "ejections_drawn",
    "rebound",
    "turnover",
    "field_block",
    "ejection_committed",
    "save",
    "sprint_won",
];

/// Immutable, ordered set of known action labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCategories {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl StatCategories {
    /// Build a vocabulary from labels, preserving order
    ///
    /// Labels are trimmed. Blank labels and duplicates are rejected.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut lookup = HashSet::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(Error::InvalidInput(
                    "stat category label cannot be blank".to_string(),
                ));
            }
            if !lookup.insert(label.to_string()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate stat category: {}",
                    label
                )));
            }
            ordered.push(label.to_string());
        }

        if ordered.is_empty() {
            return Err(Error::InvalidInput(
                "at least one stat category is required".to_string(),
            ));
        }

        Ok(Self { ordered, lookup })
    }

    /// The default water polo vocabulary
    pub fn water_polo() -> Self {
        Self {
            ordered: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            lookup: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, label: &str) -> bool {
        self.lookup.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Default for StatCategories {
    fn default() -> Self {
        Self::water_polo()
    }
}

impl Serialize for StatCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ordered.serialize(serializer)
    }
}
