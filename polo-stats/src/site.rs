//! Static site build
//!
//! Renders the season into plain `.html` files:
//!
//! ```text
//! <out>/index.html
//! <out>/game/<id>.html
//! <out>/player/<safe name>.html
//! ```
//!
//! The output directory is cleared first. Pages carry no forms.

use anyhow::{Context, Result};
use polo_common::StatCategories;
use sqlx::SqlitePool;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::season::SeasonView;
use crate::ui::{self, safe_file_name, Links};

/// What a build wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteReport {
    pub games: usize,
    pub players: usize,
}

/// Load a team's season and write it to `out_dir`
pub async fn build_site(
    pool: &SqlitePool,
    team_id: i64,
    categories: &StatCategories,
    out_dir: &Path,
) -> Result<SiteReport> {
    let view = SeasonView::load(pool, team_id, categories).await?;
    write_site(&view, out_dir)
}

/// Write an already loaded season to `out_dir`
pub fn write_site(view: &SeasonView, out_dir: &Path) -> Result<SiteReport> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("Failed to clear {}", out_dir.display()))?;
    }
    fs::create_dir_all(out_dir.join("game"))?;
    fs::create_dir_all(out_dir.join("player"))?;

    info!("Building: index.html");
    let index = ui::index::render_index(view, Links::Static { root: "" }, "");
    write_page(&out_dir.join("index.html"), &index)?;

    let nested = Links::Static { root: "../" };
    let names = view.roster.names();

    for game in &view.games {
        info!("Building: game/{}.html", game.id);
        let html = ui::game::render_game(game, &names, &view.categories, &view.team_name, nested);
        write_page(&out_dir.join("game").join(format!("{}.html", game.id)), &html)?;
    }

    for player in view.roster.players() {
        let Some((player, row)) = view.player(&player.name) else {
            continue;
        };
        let file_name = format!("{}.html", safe_file_name(&player.name));
        info!("Building: player/{}", file_name);
        let html = ui::player::render_player(player, &row, &view.categories, &view.team_name, nested);
        write_page(&out_dir.join("player").join(file_name), &html)?;
    }

    Ok(SiteReport {
        games: view.games.len(),
        players: view.roster.len(),
    })
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}
