//! Commentary ingestion pipeline
//!
//! normalize → extract → sanitize → merge. Creating a game is the same merge
//! applied to an empty game, so both paths share [`Pipeline::merge_update`].

use polo_common::events::sanitize;
use polo_common::merge::merge_events;
use polo_common::normalize::normalize;
use polo_common::time;
use polo_common::{Event, Game, Roster, StatCategories, TranscriptEntry};
use std::sync::Arc;
use tracing::info;

use crate::extraction::EventExtractor;

/// Ingestion pipeline bound to one extraction service and vocabulary
#[derive(Clone)]
pub struct Pipeline {
    extractor: EventExtractor,
    categories: Arc<StatCategories>,
}

impl Pipeline {
    pub fn new(extractor: EventExtractor, categories: Arc<StatCategories>) -> Self {
        Self {
            extractor,
            categories,
        }
    }

    pub fn categories(&self) -> &StatCategories {
        &self.categories
    }

    /// First upload of a game
    ///
    /// Returns `None` when the commentary is empty: nothing is created.
    pub async fn create_game(
        &self,
        team_id: i64,
        raw_text: &str,
        opponent: &str,
        date: &str,
        roster: &Roster,
    ) -> Option<Game> {
        normalize(raw_text)?;
        let game = Game::new(team_id, opponent, date);
        Some(self.merge_update(game, raw_text, roster).await)
    }

    /// Append one round of commentary to a game
    ///
    /// Empty commentary returns the game unchanged. Otherwise the raw text is
    /// recorded, new events are extracted and merged, and the event log and
    /// stats are rebuilt from the full list.
    pub async fn merge_update(&self, game: Game, raw_text: &str, roster: &Roster) -> Game {
        let Some(clean) = normalize(raw_text) else {
            return game;
        };

        let transcript = TranscriptEntry::new(raw_text, time::now());
        let new_events = self.extract_events(&clean, roster).await;

        info!(
            game_id = %game.id,
            existing = game.events_list.len(),
            new = new_events.len(),
            "Merging extracted events"
        );

        merge_events(game, transcript, new_events, roster, &self.categories)
    }

    async fn extract_events(&self, clean: &str, roster: &Roster) -> Vec<Event> {
        let candidates = self
            .extractor
            .extract(clean, roster.names().as_slice(), self.categories.as_slice())
            .await;
        sanitize(candidates)
    }
}
