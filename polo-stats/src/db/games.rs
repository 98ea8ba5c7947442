//! Game records
//!
//! Event list, stats, and transcripts are stored as JSON text columns.
//! Updates are guarded by the `version` column: a write only lands when the
//! stored version still matches the one that was read.

use chrono::{DateTime, Utc};
use polo_common::events::events_from_stored;
use polo_common::{Error, Game, Result, StatTable, TranscriptEntry};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

const GAME_COLUMNS: &str = "id, team_id, opponent, game_date, events_list, formatted_events, \
                            stats, transcripts, version, created_at";

/// Store a new game
pub async fn insert_game(pool: &SqlitePool, game: &Game) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO games (
            id, team_id, opponent, game_date, events_list, formatted_events,
            stats, transcripts, version, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(game.id.to_string())
    .bind(game.team_id)
    .bind(&game.opponent)
    .bind(&game.date)
    .bind(serde_json::to_string(&game.events_list)?)
    .bind(&game.formatted_events)
    .bind(serde_json::to_string(&game.stats)?)
    .bind(serde_json::to_string(&game.transcripts)?)
    .bind(game.version)
    .bind(game.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one game
pub async fn load_game(pool: &SqlitePool, game_id: Uuid) -> Result<Option<Game>> {
    let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = ?", GAME_COLUMNS))
        .bind(game_id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(game_from_row).transpose()
}

/// Load one game or fail with `NotFound`
pub async fn require_game(pool: &SqlitePool, game_id: Uuid) -> Result<Game> {
    load_game(pool, game_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("game {}", game_id)))
}

/// All games of a team, newest first
///
/// A row that fails to decode is skipped with a warning so one corrupt game
/// does not take down the season view.
pub async fn list_games(pool: &SqlitePool, team_id: i64) -> Result<Vec<Game>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM games WHERE team_id = ? ORDER BY created_at DESC, id DESC",
        GAME_COLUMNS
    ))
    .bind(team_id)
    .fetch_all(pool)
    .await?;

    let mut games = Vec::with_capacity(rows.len());
    for row in &rows {
        match game_from_row(row) {
            Ok(game) => games.push(game),
            Err(e) => {
                let id: String = row.get("id");
                warn!(game_id = %id, error = %e, "Skipping unreadable game record");
            }
        }
    }
    Ok(games)
}

/// Write a merged game back if nobody else updated it meanwhile
///
/// Stores `game.version + 1`. Returns `false` when the stored version no
/// longer matches `game.version` (or the game is gone).
pub async fn update_game(pool: &SqlitePool, game: &Game) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE games SET
            opponent = ?,
            game_date = ?,
            events_list = ?,
            formatted_events = ?,
            stats = ?,
            transcripts = ?,
            version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(&game.opponent)
    .bind(&game.date)
    .bind(serde_json::to_string(&game.events_list)?)
    .bind(&game.formatted_events)
    .bind(serde_json::to_string(&game.stats)?)
    .bind(serde_json::to_string(&game.transcripts)?)
    .bind(game.id.to_string())
    .bind(game.version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Delete a game; returns `false` when it did not exist
pub async fn delete_game(pool: &SqlitePool, game_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(game_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn game_from_row(row: &SqliteRow) -> Result<Game> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|e| Error::Internal(format!("Bad game id {}: {}", id, e)))?;

    let events: String = row.get("events_list");
    let events: Vec<Value> = serde_json::from_str(&events)?;

    let stats: String = row.get("stats");
    let stats: StatTable = serde_json::from_str(&stats)?;

    let transcripts: String = row.get("transcripts");
    let transcripts: Vec<TranscriptEntry> = serde_json::from_str(&transcripts)?;

    let created_at: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&Utc);

    Ok(Game {
        id,
        team_id: row.get("team_id"),
        opponent: row.get("opponent"),
        date: row.get("game_date"),
        events_list: events_from_stored(&events),
        formatted_events: row.get("formatted_events"),
        stats,
        transcripts,
        version: row.get("version"),
        created_at,
    })
}
