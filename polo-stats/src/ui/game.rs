//! Game detail page

use polo_common::{Game, StatCategories};

use super::{escape_html, event_log, layout, stats_table, Links};

/// Render one game: stats table, event log, and (live site only) the update
/// and delete forms
pub fn render_game(
    game: &Game,
    player_names: &[&str],
    categories: &StatCategories,
    team_name: &str,
    links: Links,
) -> String {
    let mut body = format!("<h2>{}</h2>\n", escape_html(&game.label()));

    body.push_str(&stats_table(&game.stats, player_names, categories, links));

    body.push_str("<h2>Event Log</h2>\n");
    body.push_str(&event_log(&game.formatted_events));

    if links.has_forms() {
        body.push_str(&format!(
            r#"<h2>Add Commentary</h2>
<form class="card" action="/update_game/{id}" method="post" enctype="multipart/form-data">
    <label>Transcript (.txt) <input type="file" name="transcript_file" accept=".txt,text/plain"></label>
    <label>Audio <input type="file" name="audio_file" accept="audio/*"></label>
    <button type="submit">Update Game</button>
</form>
<form class="card" action="/delete_game/{id}" method="post" onsubmit="return confirm('Delete this game?');">
    <button class="danger" type="submit">Delete Game</button>
</form>
"#,
            id = game.id
        ));
    }

    body.push_str(&format!(
        "<p><a href=\"{}\">Back to season</a></p>\n",
        escape_html(&links.index())
    ));

    layout(&game.label(), team_name, links, &body)
}
