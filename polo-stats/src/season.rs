//! Season view
//!
//! Everything the index page, the JSON projection, and the static site need,
//! loaded in one place. Season totals are recomputed on every read from the
//! stored per-game tables.

use polo_common::stats::{player_totals, season_totals, StatRow};
use polo_common::{Game, Player, Result, Roster, StatCategories, StatTable};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{games, players, teams};

/// Team, roster, games (newest first), and season totals
#[derive(Debug, Clone)]
pub struct SeasonView {
    pub team_name: String,
    pub roster: Roster,
    pub games: Vec<Game>,
    pub season_stats: StatTable,
    pub categories: StatCategories,
}

impl SeasonView {
    /// Load and aggregate the season of one team
    pub async fn load(pool: &SqlitePool, team_id: i64, categories: &StatCategories) -> Result<Self> {
        let team = teams::get_team(pool, team_id).await?;
        let roster = players::list_players(pool, team_id).await?;
        let games = games::list_games(pool, team_id).await?;
        Ok(Self::from_parts(team.name, roster, games, categories.clone()))
    }

    /// Build a view from already loaded data
    pub fn from_parts(
        team_name: String,
        roster: Roster,
        games: Vec<Game>,
        categories: StatCategories,
    ) -> Self {
        let season_stats = season_totals(games.iter().map(|g| &g.stats), &roster, &categories);
        Self {
            team_name,
            roster,
            games,
            season_stats,
            categories,
        }
    }

    /// Most recently created game
    pub fn latest_game(&self) -> Option<&Game> {
        self.games.first()
    }

    /// Season row of a rostered player; `None` when the name is not on the roster
    pub fn player(&self, name: &str) -> Option<(&Player, StatRow)> {
        let player = self.roster.get(name)?;
        Some((player, player_totals(&self.season_stats, name, &self.categories)))
    }

    /// JSON projection served at `/api/season`
    pub fn to_json(&self) -> SeasonJson<'_> {
        SeasonJson {
            team: &self.team_name,
            roster: self.roster.players(),
            stat_categories: &self.categories,
            season_stats: &self.season_stats,
            games: self.games.iter().map(GameSummary::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeasonJson<'a> {
    pub team: &'a str,
    pub roster: &'a [Player],
    pub stat_categories: &'a StatCategories,
    pub season_stats: &'a StatTable,
    pub games: Vec<GameSummary<'a>>,
}

/// Game list entry, without the event log or transcripts
#[derive(Debug, Serialize)]
pub struct GameSummary<'a> {
    pub id: String,
    pub opponent: &'a str,
    pub date: &'a str,
    pub event_count: usize,
    pub version: i64,
}

impl<'a> From<&'a Game> for GameSummary<'a> {
    fn from(game: &'a Game) -> Self {
        Self {
            id: game.id.to_string(),
            opponent: &game.opponent,
            date: &game.date,
            event_count: game.events_list.len(),
            version: game.version,
        }
    }
}
