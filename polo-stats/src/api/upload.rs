//! Commentary upload forms
//!
//! Upload and update both post `multipart/form-data` with an optional
//! `transcript_file` (UTF-8 text), an optional `audio_file`, and on upload the
//! game metadata. A plain `commentary` text field is also accepted for
//! clients without file uploads.

use axum::extract::Multipart;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::transcription::request_failed;
use crate::AppState;

/// One uploaded file part
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Decoded upload form
#[derive(Debug, Clone, Default)]
pub struct CommentaryForm {
    pub transcript_file: Option<UploadedFile>,
    pub audio_file: Option<UploadedFile>,
    pub commentary: Option<String>,
    pub opponent: String,
    pub game_date: String,
}

impl CommentaryForm {
    /// Read every known field; unknown fields are skipped
    ///
    /// A file input left empty in the browser arrives as a part with no
    /// bytes, which is treated as absent.
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = CommentaryForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "transcript_file" | "audio_file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                    if bytes.is_empty() {
                        continue;
                    }
                    let file = Some(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                    if name == "transcript_file" {
                        form.transcript_file = file;
                    } else {
                        form.audio_file = file;
                    }
                }
                "commentary" | "opponent" | "game_date" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                    match name.as_str() {
                        "commentary" => form.commentary = Some(value),
                        "opponent" => form.opponent = value,
                        _ => form.game_date = value,
                    }
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    /// Raw commentary text from the first source present
    ///
    /// Priority: transcript file, audio file (transcribed), text field.
    /// `None` means the form carried no commentary at all.
    pub async fn commentary_text(&self, state: &AppState) -> ApiResult<Option<String>> {
        if let Some(file) = &self.transcript_file {
            let text = String::from_utf8(file.bytes.clone()).map_err(|_| {
                ApiError::BadRequest(format!("{} is not UTF-8 text", file.file_name))
            })?;
            return Ok(Some(text));
        }

        if let Some(file) = &self.audio_file {
            let text = match &state.transcriber {
                Some(transcriber) => transcriber.transcribe(&file.bytes, &file.file_name).await,
                None => {
                    info!(file = %file.file_name, "Audio uploaded but no speech service is configured");
                    request_failed("speech recognition is not configured")
                }
            };
            return Ok(Some(text));
        }

        Ok(self.commentary.clone())
    }
}
