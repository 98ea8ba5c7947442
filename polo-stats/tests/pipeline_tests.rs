//! Ingestion pipeline tests
//!
//! Tests cover:
//! - Blank commentary leaves a game untouched and makes no service call
//! - Creating a game from a first round of commentary
//! - Merging rounds keeps the event list sorted and rebuilds derived fields
//! - Malformed candidates and unknown names/actions
//! - Extraction service failure

mod helpers;

use helpers::{pipeline, ScriptedExtractor, ROSTER};
use polo_common::display::format_events;
use polo_common::{Event, Game, Roster};

fn roster() -> Roster {
    Roster::from_names(ROSTER)
}

fn is_sorted(events: &[Event]) -> bool {
    events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}

#[tokio::test]
async fn test_blank_commentary_is_a_no_op() {
    let service = ScriptedExtractor::new(["[{\"player\": \"Alex Kim\", \"action\": \"goal\"}]"]);
    let pipeline = pipeline(service.clone());

    let mut game = Game::new(1, "Harbor High", "2024-03-05");
    game.events_list = vec![Event::new("Alex Kim", "goal", "2024-03-05 10:00:00.000000")];

    for blank in ["", "   ", "\n\t \u{00a0}\n"] {
        let merged = pipeline.merge_update(game.clone(), blank, &roster()).await;
        assert_eq!(merged, game);
    }
    assert!(pipeline
        .create_game(1, "  ", "Harbor High", "2024-03-05", &roster())
        .await
        .is_none());
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_create_game_from_first_round() {
    let service = ScriptedExtractor::new([r#"```json
[
  {"player": "Alex Kim", "action": "goal"},
  {"player": "Sam Lee", "action": "assist"},
  {"player": "Alex Kim", "action": "goal"}
]
```"#]);
    let pipeline = pipeline(service.clone());

    let game = pipeline
        .create_game(1, "Sam feeds Kimmy, goal! Kimmy again!", "Harbor High", "2024-03-05", &roster())
        .await
        .unwrap();

    assert_eq!(game.opponent, "Harbor High");
    assert_eq!(game.events_list.len(), 3);
    assert_eq!(game.stats.get("Alex Kim", "goal"), 2);
    assert_eq!(game.stats.get("Sam Lee", "assist"), 1);
    assert_eq!(game.stats.get("Jo Park", "goal"), 0);
    assert_eq!(game.transcripts.len(), 1);
    assert_eq!(game.transcripts[0].text, "Sam feeds Kimmy, goal! Kimmy again!");
    assert_eq!(game.formatted_events, format_events(&game.events_list));

    // Roster and vocabulary reach the service in order
    let prompt = &service.prompts()[0];
    assert!(prompt.contains("Alex Kim, Sam Lee, Jo Park"));
    assert!(prompt.contains("goal, assist, shot"));
}

#[tokio::test]
async fn test_rounds_merge_in_timestamp_order() {
    let service = ScriptedExtractor::new([
        r#"[{"player": "Alex Kim", "action": "goal"}]"#,
        r#"[{"player": "Jo Park", "action": "save"}, {"player": "Jo Park", "action": "save"}]"#,
    ]);
    let pipeline = pipeline(service);

    let game = pipeline
        .create_game(1, "Alex scores", "Harbor High", "2024-03-05", &roster())
        .await
        .unwrap();
    let game = pipeline.merge_update(game, "Jo with two saves", &roster()).await;

    assert_eq!(game.events_list.len(), 3);
    assert!(is_sorted(&game.events_list));
    assert_eq!(game.events_list[0].player, "Alex Kim");
    assert_eq!(game.stats.get("Alex Kim", "goal"), 1);
    assert_eq!(game.stats.get("Jo Park", "save"), 2);
    assert_eq!(game.transcripts.len(), 2);
    assert_eq!(game.formatted_events, format_events(&game.events_list));
}

#[tokio::test]
async fn test_earlier_round_is_resorted_before_later_events() {
    let service = ScriptedExtractor::new([r#"[{"player": "Sam Lee", "action": "steal"}]"#]);
    let pipeline = pipeline(service);

    // Events stamped far in the future: the new round must sort ahead of them
    let mut game = Game::new(1, "Harbor High", "2024-03-05");
    game.events_list = vec![
        Event::new("Alex Kim", "goal", "2999-01-01 10:00:00.000000"),
        Event::new("Jo Park", "save", "2999-01-01 11:00:00.000000"),
    ];

    let merged = pipeline.merge_update(game, "Sam picks his pocket", &roster()).await;

    let players: Vec<&str> = merged.events_list.iter().map(|e| e.player.as_str()).collect();
    assert_eq!(players, vec!["Sam Lee", "Alex Kim", "Jo Park"]);
    assert!(is_sorted(&merged.events_list));
    // Newest first in the log
    assert!(merged.formatted_events.ends_with("Steal by Sam Lee!"));
}

#[tokio::test]
async fn test_malformed_and_unknown_candidates() {
    let service = ScriptedExtractor::new([r#"[
        {"player": "Alex Kim", "action": "goal"},
        "Alex Kim scored",
        42,
        {"player": "Alex Kim"},
        {"player": 7, "action": "goal"},
        {"player": "Coach", "action": "goal"},
        {"player": "Sam Lee", "action": "dunk"}
    ]"#]);
    let pipeline = pipeline(service);

    let game = pipeline
        .create_game(1, "chaos in the pool", "", "", &roster())
        .await
        .unwrap();

    // Malformed items dropped; unknown names/actions kept but not counted
    assert_eq!(game.events_list.len(), 3);
    assert_eq!(game.stats.get("Alex Kim", "goal"), 1);
    assert!(game.stats.row("Coach").is_none());
    assert!(game.formatted_events.contains("Goal by Coach!"));
    assert!(game.formatted_events.contains("Dunk by Sam Lee!"));
    assert_eq!(game.opponent, "Unknown");
    assert_eq!(game.date, "N/A");
}

#[tokio::test]
async fn test_service_failure_records_transcript_only() {
    let service = ScriptedExtractor::failing();
    let pipeline = pipeline(service.clone());

    let mut game = Game::new(1, "Harbor High", "2024-03-05");
    game.events_list = vec![Event::new("Alex Kim", "goal", "2024-03-05 10:00:00.000000")];

    let merged = pipeline.merge_update(game.clone(), "Sam steals it", &roster()).await;

    assert_eq!(service.calls(), 1);
    assert_eq!(merged.events_list, game.events_list);
    assert_eq!(merged.transcripts.len(), 1);
    assert_eq!(merged.stats.get("Alex Kim", "goal"), 1);
}
