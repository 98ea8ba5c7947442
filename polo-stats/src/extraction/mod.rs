//! Event extraction
//!
//! Turns cleaned commentary into candidate events through an external
//! generative-text service. The service sits behind the one-method
//! [`TextExtractor`] capability so tests can swap in a canned responder.
//!
//! The service output is untrusted. Every call ends in an
//! [`ExtractionOutcome`]; failures of any kind (network, timeout, unparsable
//! response) degrade to zero candidates and never reach the caller as errors.
//! There is exactly one call per extraction, no retries.

pub mod gemini;
pub mod parse;
pub mod prompt;

pub use gemini::GeminiClient;
pub use parse::{clean_response, parse_response};
pub use prompt::build_prompt;

use async_trait::async_trait;
use polo_common::Candidate;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extraction service errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Response had no text content")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Generative text capability
///
/// One prompt in, raw response text out. Implementations make no promise that
/// the text is well-formed.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Name for log lines
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError>;
}

/// Result of one extraction attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The response was a JSON array; each item decoded individually
    Parsed(Vec<Candidate>),
    /// The service answered, but not with a JSON array
    Unparsable(String),
    /// The service call itself failed or timed out
    Failed(String),
}

impl ExtractionOutcome {
    /// Candidates on success, empty otherwise
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            ExtractionOutcome::Parsed(candidates) => candidates,
            ExtractionOutcome::Unparsable(_) | ExtractionOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Prompt building, the service call, and defensive decoding
#[derive(Clone)]
pub struct EventExtractor {
    service: Arc<dyn TextExtractor>,
    timeout: Duration,
}

impl EventExtractor {
    pub fn new(service: Arc<dyn TextExtractor>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Run one extraction and report how it went
    pub async fn run<P, A>(
        &self,
        clean_text: &str,
        known_players: &[P],
        known_actions: &[A],
    ) -> ExtractionOutcome
    where
        P: AsRef<str>,
        A: AsRef<str>,
    {
        let prompt = build_prompt(clean_text, known_players, known_actions);

        debug!(service = self.service.name(), chars = clean_text.len(), "Sending commentary for extraction");

        let response = match tokio::time::timeout(self.timeout, self.service.complete(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return ExtractionOutcome::Failed(e.to_string()),
            Err(_) => {
                return ExtractionOutcome::Failed(format!(
                    "timed out after {}s",
                    self.timeout.as_secs_f64()
                ))
            }
        };

        parse_response(&response)
    }

    /// Candidate events, empty on any failure
    pub async fn extract<P, A>(
        &self,
        clean_text: &str,
        known_players: &[P],
        known_actions: &[A],
    ) -> Vec<Candidate>
    where
        P: AsRef<str>,
        A: AsRef<str>,
    {
        match self.run(clean_text, known_players, known_actions).await {
            ExtractionOutcome::Parsed(candidates) => {
                info!(
                    service = self.service.name(),
                    candidates = candidates.len(),
                    "Extraction complete"
                );
                candidates
            }
            ExtractionOutcome::Unparsable(reason) => {
                warn!(service = self.service.name(), %reason, "Extraction response unparsable - no events");
                Vec::new()
            }
            ExtractionOutcome::Failed(reason) => {
                warn!(service = self.service.name(), %reason, "Extraction failed - no events");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polo_common::RawEvent;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, String>,
        delay: Duration,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextExtractor for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            tokio::time::sleep(self.delay).await;
            self.reply
                .clone()
                .map_err(ExtractionError::NetworkError)
        }
    }

    const PLAYERS: [&str; 2] = ["Alex Kim", "Sam Lee"];
    const ACTIONS: [&str; 2] = ["goal", "assist"];

    #[tokio::test]
    async fn test_parsed_response_yields_candidates() {
        let service = Canned::ok("```json\n[{\"player\": \"Alex Kim\", \"action\": \"goal\"}, \"oops\"]\n```");
        let extractor = EventExtractor::new(service.clone(), Duration::from_secs(5));

        let candidates = extractor.extract("Alex scores", &PLAYERS, &ACTIONS).await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], Candidate::Event(RawEvent::new("Alex Kim", "goal")));
        assert!(candidates[1].is_malformed());

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "exactly one call, no retries");
        assert!(prompts[0].contains("Alex Kim, Sam Lee"));
    }

    #[tokio::test]
    async fn test_service_error_degrades_to_empty() {
        let service = Arc::new(Canned {
            reply: Err("connection refused".to_string()),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        });
        let extractor = EventExtractor::new(service, Duration::from_secs(5));

        let outcome = extractor.run("Alex scores", &PLAYERS, &ACTIONS).await;
        assert!(matches!(outcome, ExtractionOutcome::Failed(ref r) if r.contains("connection refused")));
        assert!(outcome.into_candidates().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_empty() {
        let service = Arc::new(Canned {
            reply: Ok("[]".to_string()),
            delay: Duration::from_secs(5),
            prompts: Mutex::new(Vec::new()),
        });
        let extractor = EventExtractor::new(service, Duration::from_millis(20));

        let outcome = extractor.run("Alex scores", &PLAYERS, &ACTIONS).await;
        assert!(matches!(outcome, ExtractionOutcome::Failed(ref r) if r.contains("timed out")));
    }

    #[tokio::test]
    async fn test_unparsable_response_degrades_to_empty() {
        let extractor = EventExtractor::new(Canned::ok("Sorry, I can't help."), Duration::from_secs(5));
        assert!(extractor.extract("Alex scores", &PLAYERS, &ACTIONS).await.is_empty());
    }
}
