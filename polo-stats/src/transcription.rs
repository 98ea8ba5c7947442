//! Audio commentary transcription
//!
//! Transcription never fails a request. Every failure becomes a short
//! placeholder sentence that flows on to extraction like any other text
//! (and, having no player names in it, yields no events).

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recognizer heard nothing usable
pub const AUDIO_UNCLEAR: &str = "Audio was unclear.";

/// Audio could not be handed to a recognizer
pub const AUDIO_ERROR: &str = "Error processing audio.";

const SPEECH_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Speech-to-text capability
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcript text, or a placeholder sentence on any failure
    async fn transcribe(&self, audio: &[u8], file_name: &str) -> String;
}

/// Placeholder for a failed recognizer request
pub fn request_failed(reason: &str) -> String {
    format!("Could not request results; {}", reason)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    language_code: String,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

/// `speech:recognize` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
}

impl RecognizeResponse {
    /// Best alternative of every result, joined
    pub fn transcript(&self) -> Option<String> {
        let text = self
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Google Cloud Speech-to-Text client
///
/// Sends audio inline as base64. Encoding and sample rate are left to the
/// service to detect from the file header (WAV and FLAC).
pub struct SpeechClient {
    http_client: reqwest::Client,
    url: String,
    api_key: String,
    language_code: String,
}

impl SpeechClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            url: SPEECH_URL.to_string(),
            api_key,
            language_code: "en-US".to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn request_body(&self, audio: &[u8]) -> RecognizeRequest {
        RecognizeRequest {
            config: RecognitionConfig {
                language_code: self.language_code.clone(),
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        }
    }

    /// The key travels in a header, never in the URL
    fn request(&self, audio: &[u8]) -> reqwest::RequestBuilder {
        self.http_client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.request_body(audio))
    }

    async fn recognize(&self, audio: &[u8]) -> Result<RecognizeResponse, String> {
        let response = self
            .request(audio)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("recognition request failed ({}): {}", status, body));
        }

        response.json().await.map_err(|e| e.without_url().to_string())
    }
}

#[async_trait]
impl Transcriber for SpeechClient {
    async fn transcribe(&self, audio: &[u8], file_name: &str) -> String {
        if audio.is_empty() {
            return AUDIO_ERROR.to_string();
        }

        tracing::info!(file = file_name, bytes = audio.len(), "Transcribing audio commentary");

        match self.recognize(audio).await {
            Ok(response) => response.transcript().unwrap_or_else(|| {
                tracing::warn!(file = file_name, "Speech recognizer returned no transcript");
                AUDIO_UNCLEAR.to_string()
            }),
            Err(reason) => {
                tracing::warn!(file = file_name, %reason, "Speech recognition request failed");
                request_failed(&reason)
            }
        }
    }
}
