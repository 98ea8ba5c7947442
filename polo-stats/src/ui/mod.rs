//! Server-rendered HTML
//!
//! Pages are plain strings built with `format!` around one shared stylesheet.
//! The same renderers serve the live site and the static build; [`Links`]
//! decides how pages point at each other and whether forms are shown.

pub mod game;
pub mod index;
pub mod player;

use polo_common::display::action_title;
use polo_common::stats::StatRow;
use polo_common::{StatCategories, StatTable};
use uuid::Uuid;

/// How rendered pages link to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Links {
    /// Live server routes; forms enabled
    Server,
    /// Static `.html` files; `root` is the relative path back to the site root
    Static { root: &'static str },
}

impl Links {
    pub fn index(&self) -> String {
        match self {
            Links::Server => "/".to_string(),
            Links::Static { root } => format!("{}index.html", root),
        }
    }

    pub fn game(&self, game_id: &Uuid) -> String {
        match self {
            Links::Server => format!("/game/{}", game_id),
            Links::Static { root } => format!("{}game/{}.html", root, game_id),
        }
    }

    pub fn player(&self, name: &str) -> String {
        match self {
            Links::Server => format!("/player/{}", encode_path_segment(name)),
            Links::Static { root } => format!(
                "{}player/{}.html",
                root,
                encode_path_segment(&safe_file_name(name))
            ),
        }
    }

    /// Upload, update, and delete forms only make sense against a server
    pub fn has_forms(&self) -> bool {
        matches!(self, Links::Server)
    }
}

/// File name used for a player page in the static site
///
/// `Ja'Von Smith` → `JaVon_Smith`
pub fn safe_file_name(name: &str) -> String {
    name.replace('\'', "").replace(' ', "_")
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a URL path segment (RFC 3986 unreserved characters pass)
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Full HTML document around a page body
pub fn layout(title: &str, team_name: &str, links: Links, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <header>
        <h1><a href="{home}">{team} Water Polo</a></h1>
        <div class="build-info">v{version} [{git}]</div>
    </header>
    <main class="container">
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        css = STYLE,
        home = links.index(),
        team = escape_html(team_name),
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        body = body,
    )
}

/// Player × category table with linked names and a totals row
pub fn stats_table(
    stats: &StatTable,
    player_names: &[&str],
    categories: &StatCategories,
    links: Links,
) -> String {
    let mut html = String::from("<table class=\"stats\">\n<thead><tr><th>Player</th>");
    for category in categories.iter() {
        html.push_str(&format!("<th>{}</th>", escape_html(&action_title(category))));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for name in player_names {
        html.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td>",
            escape_html(&links.player(name)),
            escape_html(name)
        ));
        for category in categories.iter() {
            html.push_str(&format!("<td>{}</td>", stats.get(name, category)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("<tr class=\"totals\"><td>Team</td>");
    for category in categories.iter() {
        html.push_str(&format!("<td>{}</td>", stats.column_total(category)));
    }
    html.push_str("</tr>\n</tbody>\n</table>\n");
    html
}

/// Two-column category/count table for one player
pub fn stat_row_table(row: &StatRow, categories: &StatCategories) -> String {
    let mut html = String::from("<table class=\"stats\">\n<thead><tr><th>Stat</th><th>Total</th></tr></thead>\n<tbody>\n");
    for category in categories.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&action_title(category)),
            row.get(category).copied().unwrap_or(0)
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Newest-first event log block
pub fn event_log(formatted_events: &str) -> String {
    if formatted_events.is_empty() {
        return "<p class=\"muted\">No events recorded.</p>\n".to_string();
    }
    format!("<pre class=\"event-log\">{}</pre>\n", escape_html(formatted_events))
}

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }
        header {
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        header h1 { margin: 0; font-size: 26px; }
        header a { color: #4a9eff; text-decoration: none; }
        .build-info { color: #888; font-family: 'Courier New', monospace; font-size: 14px; }
        .container { padding: 20px; max-width: 1200px; margin: 0 auto; }
        h2 { color: #4a9eff; border-bottom: 1px solid #3a3a3a; padding-bottom: 5px; }
        a { color: #4a9eff; }
        table.stats { border-collapse: collapse; width: 100%; margin-bottom: 20px; }
        table.stats th, table.stats td { border: 1px solid #3a3a3a; padding: 6px 10px; text-align: center; }
        table.stats th { background-color: #2a2a2a; }
        table.stats td:first-child { text-align: left; }
        tr.totals td { font-weight: 600; background-color: #242424; }
        .event-log {
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            padding: 12px;
            white-space: pre-wrap;
            font-family: 'Courier New', monospace;
        }
        form.card {
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            padding: 15px;
            margin-bottom: 20px;
        }
        form.card label { display: block; margin-top: 8px; }
        button { background-color: #4a9eff; color: #fff; border: none; padding: 8px 16px; cursor: pointer; margin-top: 10px; }
        button.danger { background-color: #c0392b; }
        .muted { color: #888; }
        .notice { border-left: 4px solid #f0ad4e; padding: 8px 12px; background-color: #2a2a2a; }
        ul.games li { margin: 4px 0; }
"#;
