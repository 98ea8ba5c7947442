//! Test Helper Utilities
//!
//! Shared utilities for polo-stats integration tests: a scripted extraction
//! service, an in-memory app, and a multipart body builder.

#![allow(dead_code)]

use async_trait::async_trait;
use polo_common::{Player, StatCategories};
use polo_stats::db::{self, players, teams};
use polo_stats::extraction::{EventExtractor, ExtractionError, TextExtractor};
use polo_stats::pipeline::Pipeline;
use polo_stats::transcription::Transcriber;
use polo_stats::AppState;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ROSTER: [&str; 3] = ["Alex Kim", "Sam Lee", "Jo Park"];

/// Extraction service answering from a queue of replies
///
/// Once the queue is empty every call answers `[]`.
pub struct ScriptedExtractor {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedExtractor {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::slow(replies, Duration::ZERO)
    }

    /// Like [`ScriptedExtractor::new`], but every call takes `delay`
    pub fn slow<I, S>(replies: I, delay: Duration) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
            delay,
        })
    }

    /// Service whose every call fails
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(vec![Err("service unavailable".to_string())])),
            prompts: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for ScriptedExtractor {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        tokio::time::sleep(self.delay).await;
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(reason)) => Err(ExtractionError::NetworkError(reason)),
            None => Ok("[]".to_string()),
        }
    }
}

/// Speech service that counts calls and answers a fixed transcript
pub struct CountingTranscriber {
    reply: String,
    calls: Mutex<usize>,
}

impl CountingTranscriber {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Transcriber for CountingTranscriber {
    async fn transcribe(&self, _audio: &[u8], _file_name: &str) -> String {
        *self.calls.lock().unwrap() += 1;
        self.reply.clone()
    }
}

/// Pipeline over the scripted service and the water polo vocabulary
pub fn pipeline(service: Arc<ScriptedExtractor>) -> Pipeline {
    let extractor = EventExtractor::new(service, Duration::from_secs(5));
    Pipeline::new(extractor, Arc::new(StatCategories::water_polo()))
}

/// In-memory database with one team and the given players
pub async fn create_test_db(roster: &[&str]) -> (SqlitePool, i64) {
    let pool = db::init_memory_pool()
        .await
        .expect("Failed to create in-memory database");
    let team_id = teams::ensure_team(&pool, "Varsity")
        .await
        .expect("Failed to create team");
    for name in roster {
        players::upsert_player(&pool, team_id, &Player::new(*name))
            .await
            .expect("Failed to add player");
    }
    (pool, team_id)
}

/// App state over an in-memory database
pub async fn create_test_state(service: Arc<ScriptedExtractor>, roster: &[&str]) -> AppState {
    let (pool, team_id) = create_test_db(roster).await;
    AppState::new(pool, team_id, pipeline(service))
}

pub const BOUNDARY: &str = "polo-test-boundary";

/// One multipart part: name, optional file name, content
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content,
        }
    }
}

/// `multipart/form-data` body using [`BOUNDARY`]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
