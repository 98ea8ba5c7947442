//! Team records

use polo_common::{Error, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Id of the named team, creating it on first use
pub async fn ensure_team(pool: &SqlitePool, name: &str) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("team name cannot be empty".to_string()));
    }

    sqlx::query("INSERT INTO teams (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM teams WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(id)
}

pub async fn get_team(pool: &SqlitePool, team_id: i64) -> Result<Team> {
    let row = sqlx::query("SELECT id, name FROM teams WHERE id = ?")
        .bind(team_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("team {}", team_id)))?;

    Ok(Team {
        id: row.get("id"),
        name: row.get("name"),
    })
}
