//! Extraction prompt
//!
//! The rules in the template are product behavior: name resolution to the
//! roster, the closed action vocabulary, and the strict assist rule decide
//! what ends up in the stat tables.

/// Build the extraction prompt with roster and vocabulary embedded verbatim
pub fn build_prompt<P, A>(commentary: &str, known_players: &[P], known_actions: &[A]) -> String
where
    P: AsRef<str>,
    A: AsRef<str>,
{
    let roster = join(known_players);
    let actions = join(known_actions);

    format!(
        r#"You are a water polo stats assistant. Your task is to analyze game commentary and extract key events.
The official team roster is: {roster}.
The valid actions to identify are: {actions}.
Analyze the commentary below. Identify events. For each event, identify the player involved.
CRITICAL: You MUST map any nicknames or partial names to the player's FULL, OFFICIAL name from the roster.
CRITICAL: The action name in your output MUST be one of the valid actions listed above.
*** IMPORTANT RULE FOR ASSISTS ***
Only count an 'assist' if a pass is EXPLICITLY MENTIONED as leading directly to a goal. Do not infer assists.
Return the events as a valid JSON list of objects. Each object must have "player" and "action" keys.
Game Commentary to Analyze:
"{commentary}"
JSON Output:
"#
    )
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
