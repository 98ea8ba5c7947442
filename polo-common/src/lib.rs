//! # Polo Common Library
//!
//! Domain core shared by the polo-stats web service and its tools:
//! - Stat category vocabulary and roster types
//! - Event decoding, sanitizing, and display formatting
//! - Stat aggregation (per game and per season)
//! - Game records and the pure merge step
//! - Configuration loading

pub mod categories;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod game;
pub mod merge;
pub mod normalize;
pub mod roster;
pub mod stats;
pub mod time;

pub use categories::StatCategories;
pub use error::{Error, Result};
pub use events::{Candidate, Event, RawEvent, TranscriptEntry};
pub use game::Game;
pub use roster::{Player, Roster};
pub use stats::StatTable;
