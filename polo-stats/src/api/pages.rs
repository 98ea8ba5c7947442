//! HTML page handlers

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};

use super::parse_game_id;
use crate::db::{games, players, teams};
use crate::error::{ApiError, ApiResult};
use crate::season::SeasonView;
use crate::ui::{self, Links};
use crate::AppState;

/// GET /
pub async fn index_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let view = SeasonView::load(&state.db, state.team_id, &state.categories).await?;
    let today = polo_common::time::now().format("%Y-%m-%d").to_string();
    Ok(Html(ui::index::render_index(&view, Links::Server, &today)))
}

/// GET /game/:id
pub async fn game_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let game_id = parse_game_id(&raw_id)?;
    let game = games::require_game(&state.db, game_id).await?;
    let team = teams::get_team(&state.db, state.team_id).await?;
    let roster = players::list_players(&state.db, state.team_id).await?;

    Ok(Html(ui::game::render_game(
        &game,
        &roster.names(),
        &state.categories,
        &team.name,
        Links::Server,
    )))
}

/// GET /player/:name
///
/// Only exact roster names have a page.
pub async fn player_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Html<String>> {
    let view = SeasonView::load(&state.db, state.team_id, &state.categories).await?;
    let (player, row) = view
        .player(&name)
        .ok_or_else(|| ApiError::NotFound(format!("player {}", name)))?;

    Ok(Html(ui::player::render_player(
        player,
        &row,
        &view.categories,
        &view.team_name,
        Links::Server,
    )))
}

/// Build HTML page routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_page))
        .route("/game/:id", get(game_page))
        .route("/player/:name", get(player_page))
}
