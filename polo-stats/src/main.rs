//! polo-stats - water polo team stats web service
//!
//! Serves the season pages, accepts commentary uploads, and keeps per-game
//! and season stats in SQLite.

use anyhow::{Context, Result};
use clap::Parser;
use polo_stats::config::{init_tracing, Overrides, Settings, GEMINI_KEY_ENV};
use polo_stats::db::{self, players, teams};
use polo_stats::extraction::{EventExtractor, GeminiClient};
use polo_stats::pipeline::Pipeline;
use polo_stats::transcription::SpeechClient;
use polo_stats::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "polo-stats")]
#[command(about = "Water polo team stats web service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "POLO_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "POLO_DATABASE")]
    database: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5000
    #[arg(short, long, env = "POLO_BIND")]
    bind: Option<String>,

    /// Team served by this instance
    #[arg(long, env = "POLO_TEAM")]
    team: Option<String>,

    /// roster.json used to seed the players table
    #[arg(long, env = "POLO_ROSTER")]
    roster: Option<PathBuf>,

    /// Gemini API key (falls back to GEMINI_API_KEY)
    #[arg(long)]
    gemini_api_key: Option<String>,

    /// Speech-to-text API key (falls back to POLO_SPEECH_API_KEY)
    #[arg(long)]
    speech_api_key: Option<String>,
}

impl From<Args> for Overrides {
    fn from(args: Args) -> Self {
        Overrides {
            config: args.config,
            database: args.database,
            bind: args.bind,
            team: args.team,
            roster: args.roster,
            gemini_api_key: args.gemini_api_key,
            speech_api_key: args.speech_api_key,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let settings = Settings::load(args.into())?;

    init_tracing(&settings.log_level);

    info!(
        "Starting polo-stats v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let api_key = settings.gemini_api_key.clone().with_context(|| {
        format!(
            "No Gemini API key configured; set {} or gemini_api_key in the config file",
            GEMINI_KEY_ENV
        )
    })?;

    info!("Database path: {}", settings.database_path.display());
    let pool = db::init_database_pool(&settings.database_path)
        .await
        .context("Failed to open database")?;

    let team_id = teams::ensure_team(&pool, &settings.team_name).await?;
    info!(team = %settings.team_name, team_id, "Serving team");

    if let Some(roster_path) = &settings.roster_path {
        players::seed_roster_from_file(&pool, team_id, roster_path)
            .await
            .with_context(|| format!("Failed to seed roster from {}", roster_path.display()))?;
    }
    let roster = players::list_players(&pool, team_id).await?;
    if roster.is_empty() {
        warn!("Roster is empty; uploads will be rejected until players are added");
    } else {
        info!(players = roster.len(), "Roster loaded");
    }

    let gemini = GeminiClient::new(api_key, settings.gemini_model.clone())?;
    info!(model = gemini.model(), "Extraction service ready");
    let extractor = EventExtractor::new(Arc::new(gemini), settings.extraction_timeout);
    let pipeline = Pipeline::new(extractor, Arc::new(settings.categories.clone()));

    let mut state = AppState::new(pool, team_id, pipeline);
    match &settings.speech_api_key {
        Some(key) => {
            state = state.with_transcriber(Arc::new(SpeechClient::new(key.clone())?));
            info!("Speech transcription enabled");
        }
        None => info!("No speech API key; audio uploads will not be transcribed"),
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind))?;
    info!("polo-stats listening on http://{}", settings.bind);
    info!("Health check: http://{}/health", settings.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
