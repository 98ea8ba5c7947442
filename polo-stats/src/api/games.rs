//! Game form posts: upload, update, delete
//!
//! Missing commentary is not an error; the request just redirects without
//! touching anything.

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
    routing::post,
    Router,
};
use tracing::info;

use super::parse_game_id;
use super::upload::CommentaryForm;
use crate::db::{games, players};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /upload
///
/// Creates a game from the first round of commentary.
pub async fn upload_game(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Redirect> {
    let form = CommentaryForm::read(multipart).await?;

    // Checked before any transcription call
    let roster = players::list_players(&state.db, state.team_id).await?;
    if roster.is_empty() {
        return Err(ApiError::Internal(
            "Roster is empty; seed players before uploading commentary".to_string(),
        ));
    }

    let Some(text) = form.commentary_text(&state).await? else {
        info!("Upload carried no commentary, nothing created");
        return Ok(Redirect::to("/"));
    };

    let created = state
        .pipeline
        .create_game(state.team_id, &text, &form.opponent, &form.game_date, &roster)
        .await;

    match created {
        Some(game) => {
            games::insert_game(&state.db, &game).await?;
            info!(
                game_id = %game.id,
                opponent = %game.opponent,
                events = game.events_list.len(),
                "Game created"
            );
        }
        None => info!("Uploaded commentary was blank, nothing created"),
    }

    Ok(Redirect::to("/"))
}

/// POST /update_game/:id
///
/// Merges another round of commentary into an existing game. The game's lock
/// is held from the fresh read through the versioned write.
pub async fn update_game(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    let game_id = parse_game_id(&raw_id)?;
    let redirect = Redirect::to(&format!("/game/{}", game_id));

    // Unknown games are reported before any transcription work
    games::require_game(&state.db, game_id).await?;

    let form = CommentaryForm::read(multipart).await?;
    let Some(text) = form.commentary_text(&state).await? else {
        info!(game_id = %game_id, "Update carried no commentary, game unchanged");
        return Ok(redirect);
    };

    let _guard = state.game_locks.acquire(game_id).await;

    let game = games::require_game(&state.db, game_id).await?;
    let roster = players::list_players(&state.db, state.team_id).await?;
    let merged = state.pipeline.merge_update(game, &text, &roster).await;

    if !games::update_game(&state.db, &merged).await? {
        return Err(ApiError::Conflict(format!(
            "game {} was modified by another request",
            game_id
        )));
    }

    info!(game_id = %game_id, events = merged.events_list.len(), "Game updated");
    Ok(redirect)
}

/// POST /delete_game/:id
pub async fn delete_game(State(state): State<AppState>, Path(raw_id): Path<String>) -> ApiResult<Redirect> {
    let game_id = parse_game_id(&raw_id)?;

    let deleted = {
        let _guard = state.game_locks.acquire(game_id).await;
        games::delete_game(&state.db, game_id).await?
    };
    state.game_locks.forget(game_id).await;

    if !deleted {
        return Err(ApiError::NotFound(format!("game {}", game_id)));
    }

    info!(game_id = %game_id, "Game deleted");
    Ok(Redirect::to("/"))
}

/// Build game form routes
pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_game))
        .route("/update_game/:id", post(update_game))
        .route("/delete_game/:id", post(delete_game))
}
