//! Configuration loading and setting resolution
//!
//! Bootstrap settings come from a TOML file. Individual values can be
//! overridden, in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and starts
//! with defaults.

use crate::{Error, Result, StatCategories};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "polo-stats.toml";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// HTTP listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Team served by this instance (created on first start)
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// JSON roster file used to seed the players table
    #[serde(default)]
    pub roster_path: Option<PathBuf>,

    /// Override of the stat category vocabulary
    #[serde(default)]
    pub stat_categories: Option<Vec<String>>,

    /// Upper bound on one extraction call
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub speech_api_key: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            bind: default_bind(),
            team_name: default_team_name(),
            roster_path: None,
            stat_categories: None,
            extraction_timeout_secs: default_extraction_timeout_secs(),
            gemini_model: default_gemini_model(),
            gemini_api_key: None,
            speech_api_key: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Build the category vocabulary, falling back to the water polo default
    pub fn categories(&self) -> Result<StatCategories> {
        match &self.stat_categories {
            Some(labels) => StatCategories::new(labels)
                .map_err(|e| Error::Config(format!("stat_categories: {}", e))),
            None => Ok(StatCategories::water_polo()),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("polo.db")
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_team_name() -> String {
    "Team".to_string()
}

fn default_extraction_timeout_secs() -> u64 {
    60
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location (`~/.config/polo-stats/polo-stats.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("polo-stats").join(CONFIG_FILE_NAME))
}

/// Load the TOML config
///
/// An explicit path must exist and parse. Without one, the platform default
/// location is tried and a missing file yields defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return read_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => read_toml_config(&path),
        Some(path) => {
            warn!(
                "No config file at {} - using built-in defaults",
                path.display()
            );
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory - using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve a string setting by priority: CLI → environment → TOML
///
/// Blank values at any tier are skipped.
pub fn resolve_setting(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
) -> Option<String> {
    if let Some(value) = cli_arg.filter(|v| is_valid_value(v)) {
        return Some(value.to_string());
    }

    if let Ok(value) = std::env::var(env_var_name) {
        if is_valid_value(&value) {
            return Some(value);
        }
    }

    toml_value.filter(|v| is_valid_value(v)).map(str::to_string)
}

/// Non-empty, non-whitespace
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}
