//! JSON projection of the season and of single games

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::parse_game_id;
use crate::db::games;
use crate::error::ApiResult;
use crate::season::SeasonView;
use crate::AppState;

/// GET /api/season
///
/// `{team, roster, stat_categories, season_stats, games}`
pub async fn get_season(State(state): State<AppState>) -> ApiResult<Response> {
    let view = SeasonView::load(&state.db, state.team_id, &state.categories).await?;
    Ok(Json(view.to_json()).into_response())
}

/// GET /api/games/:id
pub async fn get_game(State(state): State<AppState>, Path(raw_id): Path<String>) -> ApiResult<Response> {
    let game_id = parse_game_id(&raw_id)?;
    let game = games::require_game(&state.db, game_id).await?;
    Ok(Json(game).into_response())
}

/// Build JSON routes
pub fn season_routes() -> Router<AppState> {
    Router::new()
        .route("/api/season", get(get_season))
        .route("/api/games/:id", get(get_game))
}
