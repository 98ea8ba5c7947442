//! Index page: season stats, latest game, game list, roster, upload form

use super::{escape_html, event_log, layout, stats_table, Links};
use crate::season::SeasonView;

/// Render the season overview
///
/// `today` pre-fills the game date of the upload form.
pub fn render_index(view: &SeasonView, links: Links, today: &str) -> String {
    let mut body = String::new();

    if view.roster.is_empty() {
        body.push_str(
            "<p class=\"notice\">No players on the roster yet. Configure a roster file to start recording stats.</p>\n",
        );
    }

    body.push_str("<h2>Season Stats</h2>\n");
    body.push_str(&stats_table(
        &view.season_stats,
        &view.roster.names(),
        &view.categories,
        links,
    ));

    if links.has_forms() {
        body.push_str(&upload_form(today));
    }

    body.push_str("<h2>Latest Game</h2>\n");
    match view.latest_game() {
        Some(game) => {
            body.push_str(&format!(
                "<h3><a href=\"{}\">{}</a></h3>\n",
                escape_html(&links.game(&game.id)),
                escape_html(&game.label())
            ));
            body.push_str(&event_log(&game.formatted_events));
        }
        None => body.push_str("<p class=\"muted\">No games yet.</p>\n"),
    }

    body.push_str("<h2>Games</h2>\n");
    if view.games.is_empty() {
        body.push_str("<p class=\"muted\">No games yet.</p>\n");
    } else {
        body.push_str("<ul class=\"games\">\n");
        for game in &view.games {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a> <span class=\"muted\">{} events</span></li>\n",
                escape_html(&links.game(&game.id)),
                escape_html(&game.label()),
                game.events_list.len()
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Roster</h2>\n<ul class=\"roster\">\n");
    for player in view.roster.players() {
        let mut details = Vec::new();
        if let Some(cap) = player.cap_number() {
            details.push(format!("#{}", cap));
        }
        if let Some(position) = player.position() {
            details.push(position);
        }
        let details = if details.is_empty() {
            String::new()
        } else {
            format!(" <span class=\"muted\">{}</span>", escape_html(&details.join(", ")))
        };
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a>{}</li>\n",
            escape_html(&links.player(&player.name)),
            escape_html(&player.name),
            details
        ));
    }
    body.push_str("</ul>\n");

    layout(
        &format!("{} Season Stats", view.team_name),
        &view.team_name,
        links,
        &body,
    )
}

fn upload_form(today: &str) -> String {
    format!(
        r#"<h2>Upload Game Commentary</h2>
<form class="card" action="/upload" method="post" enctype="multipart/form-data">
    <label>Opponent <input type="text" name="opponent" required></label>
    <label>Game date <input type="date" name="game_date" value="{today}"></label>
    <label>Transcript (.txt) <input type="file" name="transcript_file" accept=".txt,text/plain"></label>
    <label>Audio <input type="file" name="audio_file" accept="audio/*"></label>
    <button type="submit">Process Game</button>
</form>
"#,
        today = escape_html(today)
    )
}
