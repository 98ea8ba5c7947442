//! Player season page

use polo_common::stats::StatRow;
use polo_common::{Player, StatCategories};

use super::{escape_html, layout, stat_row_table, Links};

/// Profile fields shown above the stats, in display order
const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("cap_number", "Cap"),
    ("position", "Position"),
    ("year", "Year"),
];

pub fn render_player(
    player: &Player,
    season_row: &StatRow,
    categories: &StatCategories,
    team_name: &str,
    links: Links,
) -> String {
    let mut body = format!("<h2>{}</h2>\n", escape_html(&player.name));

    let facts: Vec<String> = PROFILE_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            player
                .field_text(key)
                .map(|value| format!("<li>{}: {}</li>", label, escape_html(&value)))
        })
        .collect();
    if !facts.is_empty() {
        body.push_str(&format!("<ul class=\"profile\">{}</ul>\n", facts.join("")));
    }

    body.push_str("<h3>Season Totals</h3>\n");
    body.push_str(&stat_row_table(season_row, categories));
    body.push_str(&format!(
        "<p><a href=\"{}\">Back to season</a></p>\n",
        escape_html(&links.index())
    ));

    layout(&player.name, team_name, links, &body)
}
