//! Stat aggregation
//!
//! A [`StatTable`] is total over roster × categories: every known player has a
//! row and every row has every category, zero when nothing was recorded.
//! Tables are always rebuilt from the authoritative event list, never patched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::events::Event;
use crate::{Roster, StatCategories};

/// Per-player, per-category counts
pub type StatRow = BTreeMap<String, u32>;

/// Player name → category → count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable {
    rows: BTreeMap<String, StatRow>,
}

impl StatTable {
    /// Zero-filled table over every roster player and category
    pub fn zeroed(roster: &Roster, categories: &StatCategories) -> Self {
        let rows = roster
            .names()
            .into_iter()
            .map(|name| (name.to_string(), zero_row(categories)))
            .collect();
        Self { rows }
    }

    /// Count for one cell, zero when absent
    pub fn get(&self, player: &str, category: &str) -> u32 {
        self.rows
            .get(player)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or(0)
    }

    pub fn row(&self, player: &str) -> Option<&StatRow> {
        self.rows.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Sum of one category across all players
    pub fn column_total(&self, category: &str) -> u32 {
        self.rows.values().filter_map(|row| row.get(category)).sum()
    }

    /// Increment an existing cell; cells outside the grid are ignored
    fn bump(&mut self, player: &str, category: &str) -> bool {
        match self.rows.get_mut(player).and_then(|row| row.get_mut(category)) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Add another table's counts for every cell present in both
    pub fn absorb(&mut self, other: &StatTable) {
        for (player, other_row) in &other.rows {
            if let Some(row) = self.rows.get_mut(player) {
                for (category, value) in other_row {
                    if let Some(count) = row.get_mut(category) {
                        *count += value;
                    }
                }
            }
        }
    }
}

fn zero_row(categories: &StatCategories) -> StatRow {
    categories.iter().map(|c| (c.to_string(), 0)).collect()
}

/// Fold events into a per-game table
///
/// Only events whose (trimmed) player is on the roster and whose (trimmed)
/// action is a known category count. Matching is exact and case-sensitive.
pub fn aggregate(events: &[Event], roster: &Roster, categories: &StatCategories) -> StatTable {
    let mut table = StatTable::zeroed(roster, categories);
    let mut ignored = 0usize;

    for event in events {
        if !table.bump(event.player.trim(), event.action.trim()) {
            ignored += 1;
        }
    }

    if ignored > 0 {
        tracing::debug!(
            counted = events.len() - ignored,
            ignored,
            "Events outside roster or vocabulary were not counted"
        );
    }

    table
}

/// Sum game tables into season totals for the current roster
///
/// Players or categories no longer on the roster/vocabulary are ignored.
/// Pure summation, so game order does not matter.
pub fn season_totals<'a, I>(games: I, roster: &Roster, categories: &StatCategories) -> StatTable
where
    I: IntoIterator<Item = &'a StatTable>,
{
    let mut season = StatTable::zeroed(roster, categories);
    for game in games {
        season.absorb(game);
    }
    season
}

/// One player's season row, all zeros when the player has no row
pub fn player_totals(season: &StatTable, player: &str, categories: &StatCategories) -> StatRow {
    season
        .row(player)
        .cloned()
        .unwrap_or_else(|| zero_row(categories))
}
