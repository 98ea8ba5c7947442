//! polo-stats library - water polo team stats service
//!
//! Commentary (text or audio) comes in through upload forms, events are
//! extracted by a generative-text service, and per-game and season stats are
//! served as HTML pages and JSON.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod extraction;
pub mod locks;
pub mod pipeline;
pub mod season;
pub mod site;
pub mod transcription;
pub mod ui;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use polo_common::StatCategories;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::locks::GameLocks;
use crate::pipeline::Pipeline;
use crate::transcription::Transcriber;

/// Upload size cap (audio commentary files)
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Team whose season this instance serves
    pub team_id: i64,
    /// Stat category vocabulary, fixed at startup
    pub categories: Arc<StatCategories>,
    /// Commentary ingestion pipeline
    pub pipeline: Arc<Pipeline>,
    /// Speech-to-text; audio uploads fall back to a placeholder when absent
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Per-game mutual exclusion for read-merge-write
    pub game_locks: GameLocks,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, team_id: i64, pipeline: Pipeline) -> Self {
        let categories = Arc::new(pipeline.categories().clone());
        Self {
            db,
            team_id,
            categories,
            pipeline: Arc::new(pipeline),
            transcriber: None,
            game_locks: GameLocks::new(),
            startup_time: Utc::now(),
        }
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // HTML pages
        .merge(api::page_routes())
        // Form posts
        .merge(api::game_routes())
        // JSON
        .merge(api::season_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
