//! Roster store
//!
//! Players keep roster order (insertion order). Profile fields other than the
//! name are stored as an opaque JSON object.

use polo_common::{Error, Player, Result, Roster};
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Ordered players of a team
pub async fn list_players(pool: &SqlitePool, team_id: i64) -> Result<Roster> {
    let rows = sqlx::query("SELECT name, profile FROM players WHERE team_id = ? ORDER BY id ASC")
        .bind(team_id)
        .fetch_all(pool)
        .await?;

    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.get("name");
        let profile: String = row.get("profile");
        let profile = match serde_json::from_str::<Map<String, Value>>(&profile) {
            Ok(map) => map,
            Err(e) => {
                warn!(player = %name, error = %e, "Unreadable player profile, using empty profile");
                Map::new()
            }
        };
        players.push(Player { name, profile });
    }

    Ok(Roster::new(players))
}

/// Insert a player, or replace the profile of an existing one
pub async fn upsert_player(pool: &SqlitePool, team_id: i64, player: &Player) -> Result<()> {
    let name = player.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("player name cannot be empty".to_string()));
    }

    let mut profile = player.profile.clone();
    profile.remove("name");
    let profile = serde_json::to_string(&profile)?;

    sqlx::query(
        r#"
        INSERT INTO players (team_id, name, profile) VALUES (?, ?, ?)
        ON CONFLICT(team_id, name) DO UPDATE SET profile = excluded.profile
        "#,
    )
    .bind(team_id)
    .bind(name)
    .bind(profile)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a `roster.json` file (JSON array of player objects)
pub fn read_roster_file(path: &Path) -> Result<Vec<Player>> {
    let content = std::fs::read_to_string(path)?;
    let players: Vec<Player> = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
    Ok(players)
}

/// Upsert every player from a roster file; returns how many were written
pub async fn seed_roster_from_file(pool: &SqlitePool, team_id: i64, path: &Path) -> Result<usize> {
    let players = read_roster_file(path)?;
    for player in &players {
        upsert_player(pool, team_id, player).await?;
    }
    info!(count = players.len(), file = %path.display(), "Roster seeded");
    Ok(players.len())
}
