//! Pure game merge
//!
//! Appends an extraction round to a game: the raw transcript goes into the
//! audit list, the new events join the existing ones, the combined list is
//! re-sorted by timestamp, and the derived log and stats are rebuilt from
//! scratch. Extraction itself is the caller's job, which keeps this step
//! deterministic.

use crate::display::format_events;
use crate::events::{Event, TranscriptEntry};
use crate::stats::aggregate;
use crate::{Game, Roster, StatCategories};

/// Merge sanitized events into a game
pub fn merge_events(
    mut game: Game,
    transcript: TranscriptEntry,
    new_events: Vec<Event>,
    roster: &Roster,
    categories: &StatCategories,
) -> Game {
    game.transcripts.push(transcript);
    game.events_list.extend(new_events);
    recompute(game, roster, categories)
}

/// Re-sort events and rebuild every derived field
///
/// The sort is stable: events sharing a timestamp keep their relative order.
pub fn recompute(mut game: Game, roster: &Roster, categories: &StatCategories) -> Game {
    game.events_list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    game.formatted_events = format_events(&game.events_list);
    game.stats = aggregate(&game.events_list, roster, categories);
    game
}
