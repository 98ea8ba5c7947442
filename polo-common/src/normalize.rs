//! Commentary normalizer
//!
//! Cleans typed or transcribed commentary before it is sent for extraction.

/// Normalize raw commentary
///
/// Returns `None` when nothing is left after cleaning; callers treat that as
/// "no content" rather than an error.
///
/// # Examples
///
/// ```
/// use polo_common::normalize::normalize;
///
/// assert_eq!(normalize("  Alex\u{00a0}scores!  ").as_deref(), Some("Alex scores!"));
/// assert_eq!(normalize(" \n\t "), None);
/// ```
pub fn normalize(raw: &str) -> Option<String> {
    let text = raw.trim_start_matches('\u{feff}');

    let lines: Vec<String> = text
        .lines()
        .map(clean_line)
        .collect();

    // Drop leading/trailing blank lines, keep interior paragraph breaks
    let first = lines.iter().position(|l| !l.is_empty())?;
    let last = lines.iter().rposition(|l| !l.is_empty())?;

    Some(lines[first..=last].join("\n"))
}

fn clean_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;

    for ch in line.chars() {
        let ch = if ch == '\u{00a0}' { ' ' } else { ch };
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_control() {
            continue;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }

    out
}
