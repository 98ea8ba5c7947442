//! Aggregation properties
//!
//! Tests cover:
//! - Empty event list yields the all-zero roster × category grid
//! - Aggregation is independent of event order
//! - Season totals equal aggregating every game's events at once
//! - Unknown players and actions are not counted

use polo_common::stats::{aggregate, season_totals};
use polo_common::{Event, Roster, StatCategories, StatTable};

fn roster() -> Roster {
    Roster::from_names(["Alex Kim", "Sam Lee", "Jo Park"])
}

fn events() -> Vec<Event> {
    vec![
        Event::new("Alex Kim", "goal", "2024-03-05 10:00:00.000000"),
        Event::new("Sam Lee", "assist", "2024-03-05 10:00:01.000000"),
        Event::new("Alex Kim", "goal", "2024-03-05 10:05:00.000000"),
        Event::new("Jo Park", "save", "2024-03-05 10:06:00.000000"),
        Event::new("Coach", "goal", "2024-03-05 10:07:00.000000"),
        Event::new("Sam Lee", "dunk", "2024-03-05 10:08:00.000000"),
        Event::new("Jo Park", "save", "2024-03-05 10:09:00.000000"),
        Event::new("Sam Lee", "steal", "2024-03-05 10:10:00.000000"),
    ]
}

#[test]
fn test_empty_events_give_zero_grid() {
    let cats = StatCategories::water_polo();
    let table = aggregate(&[], &roster(), &cats);

    for name in roster().names() {
        for cat in cats.iter() {
            assert_eq!(table.row(name).and_then(|r| r.get(cat)), Some(&0), "{} / {}", name, cat);
        }
    }
    assert_eq!(table.players().count(), 3);
}

#[test]
fn test_aggregate_is_order_independent() {
    let cats = StatCategories::water_polo();
    let forward = aggregate(&events(), &roster(), &cats);

    let mut reversed = events();
    reversed.reverse();
    assert_eq!(aggregate(&reversed, &roster(), &cats), forward);

    // Rotate through every starting offset
    let base = events();
    for k in 0..base.len() {
        let mut rotated = base.clone();
        rotated.rotate_left(k);
        assert_eq!(aggregate(&rotated, &roster(), &cats), forward, "rotation {}", k);
    }
}

#[test]
fn test_season_equals_concatenated_games() {
    let cats = StatCategories::water_polo();
    let all = events();
    let (first, rest) = all.split_at(3);
    let (second, third) = rest.split_at(2);

    let games: Vec<StatTable> = [first, second, third]
        .iter()
        .map(|chunk| aggregate(chunk, &roster(), &cats))
        .collect();

    let season = season_totals(&games, &roster(), &cats);
    assert_eq!(season, aggregate(&all, &roster(), &cats));

    let reversed: Vec<&StatTable> = games.iter().rev().collect();
    assert_eq!(season_totals(reversed, &roster(), &cats), season);
}

#[test]
fn test_season_ignores_players_dropped_from_roster() {
    let cats = StatCategories::water_polo();
    let game = aggregate(&events(), &roster(), &cats);

    let current = Roster::from_names(["Alex Kim"]);
    let season = season_totals([&game], &current, &cats);

    assert_eq!(season.get("Alex Kim", "goal"), 2);
    assert!(season.row("Sam Lee").is_none());
}

#[test]
fn test_worked_example() {
    let roster = Roster::from_names(["Alex Kim", "Sam Lee"]);
    let cats = StatCategories::new(["goal", "assist"]).unwrap();
    let events = vec![
        Event::new("Alex Kim", "goal", "t1"),
        Event::new("Unknown Person", "goal", "t2"),
        Event::new("Sam Lee", "block", "t3"),
    ];

    let table = aggregate(&events, &roster, &cats);

    assert_eq!(
        serde_json::to_value(&table).unwrap(),
        serde_json::json!({
            "Alex Kim": {"goal": 1, "assist": 0},
            "Sam Lee": {"goal": 0, "assist": 0}
        })
    );
}
