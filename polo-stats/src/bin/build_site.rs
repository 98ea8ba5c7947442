//! polo-build-site - render the season as a static website
//!
//! Reads the same database and config as the server and writes plain HTML
//! pages (no forms) suitable for any static file host.

use anyhow::{Context, Result};
use clap::Parser;
use polo_stats::config::{init_tracing, Overrides, Settings};
use polo_stats::db::{self, teams};
use polo_stats::site::build_site;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "polo-build-site")]
#[command(about = "Render polo-stats pages into a static site")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "POLO_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "POLO_DATABASE")]
    database: Option<PathBuf>,

    /// Team to render
    #[arg(long, env = "POLO_TEAM")]
    team: Option<String>,

    /// Output directory (cleared first)
    #[arg(short, long, default_value = "dist")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let out = args.out.clone();
    let settings = Settings::load(Overrides {
        config: args.config,
        database: args.database,
        team: args.team,
        ..Default::default()
    })?;

    init_tracing(&settings.log_level);

    info!(
        "Starting static site build v{} [{}]",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let pool = db::init_database_pool(&settings.database_path)
        .await
        .context("Failed to open database")?;
    let team_id = teams::ensure_team(&pool, &settings.team_name).await?;

    let report = build_site(&pool, team_id, &settings.categories, &out).await?;

    info!(
        games = report.games,
        players = report.players,
        "Build complete; static site is in {}",
        out.display()
    );
    Ok(())
}
