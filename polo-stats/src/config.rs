//! Runtime settings for the polo-stats binaries
//!
//! Merges command-line overrides with the TOML file from `polo_common::config`.
//! API keys additionally fall back to their environment variables.

use polo_common::config::{load_toml_config, resolve_setting, TomlConfig};
use polo_common::StatCategories;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const SPEECH_KEY_ENV: &str = "POLO_SPEECH_API_KEY";

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub bind: Option<String>,
    pub team: Option<String>,
    pub roster: Option<PathBuf>,
    pub gemini_api_key: Option<String>,
    pub speech_api_key: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind: String,
    pub team_name: String,
    pub roster_path: Option<PathBuf>,
    pub categories: StatCategories,
    pub extraction_timeout: Duration,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub speech_api_key: Option<String>,
    pub log_level: String,
}

impl Settings {
    /// Load the TOML file named by the overrides (or the default location)
    /// and apply the overrides on top
    pub fn load(overrides: Overrides) -> polo_common::Result<Self> {
        let toml = load_toml_config(overrides.config.as_deref())?;
        Self::from_parts(overrides, toml)
    }

    pub fn from_parts(overrides: Overrides, toml: TomlConfig) -> polo_common::Result<Self> {
        let categories = toml.categories()?;

        let gemini_api_key = resolve_setting(
            overrides.gemini_api_key.as_deref(),
            GEMINI_KEY_ENV,
            toml.gemini_api_key.as_deref(),
        );
        let speech_api_key = resolve_setting(
            overrides.speech_api_key.as_deref(),
            SPEECH_KEY_ENV,
            toml.speech_api_key.as_deref(),
        );

        Ok(Self {
            database_path: overrides.database.unwrap_or(toml.database_path),
            bind: overrides.bind.unwrap_or(toml.bind),
            team_name: overrides.team.unwrap_or(toml.team_name),
            roster_path: overrides.roster.or(toml.roster_path),
            categories,
            extraction_timeout: Duration::from_secs(toml.extraction_timeout_secs),
            gemini_model: toml.gemini_model,
            gemini_api_key,
            speech_api_key,
            log_level: toml.logging.level,
        })
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
