//! Configuration loading and setting resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that set POLO_TEST_* variables are marked with #[serial].

use polo_common::config::{load_toml_config, resolve_setting, LoggingConfig, TomlConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_explicit_config_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("polo-stats.toml");
    std::fs::write(
        &path,
        r#"
database_path = "/tmp/season.db"
bind = "0.0.0.0:8080"
team_name = "Varsity"
roster_path = "roster.json"
extraction_timeout_secs = 15

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(Some(&path)).unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/season.db"));
    assert_eq!(config.bind, "0.0.0.0:8080");
    assert_eq!(config.team_name, "Varsity");
    assert_eq!(config.roster_path, Some(PathBuf::from("roster.json")));
    assert_eq!(config.extraction_timeout_secs, 15);
    assert_eq!(config.gemini_model, "gemini-1.5-flash");
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string()
        }
    );
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_toml_config(Some(&dir.path().join("absent.toml")));
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "bind = [not toml").unwrap();
    assert!(load_toml_config(Some(&path)).is_err());
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = TomlConfig {
        team_name: "JV".to_string(),
        stat_categories: Some(vec!["goal".to_string(), "save".to_string()]),
        ..TomlConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    let back: TomlConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
#[serial]
fn test_resolve_setting_priority() {
    env::set_var("POLO_TEST_SETTING", "from-env");

    assert_eq!(
        resolve_setting(Some("from-cli"), "POLO_TEST_SETTING", Some("from-toml")).as_deref(),
        Some("from-cli")
    );
    assert_eq!(
        resolve_setting(None, "POLO_TEST_SETTING", Some("from-toml")).as_deref(),
        Some("from-env")
    );

    env::remove_var("POLO_TEST_SETTING");
    assert_eq!(
        resolve_setting(None, "POLO_TEST_SETTING", Some("from-toml")).as_deref(),
        Some("from-toml")
    );
    assert_eq!(resolve_setting(None, "POLO_TEST_SETTING", None), None);
}

#[test]
#[serial]
fn test_resolve_setting_skips_blank_values() {
    env::set_var("POLO_TEST_SETTING", "   ");
    assert_eq!(
        resolve_setting(Some(""), "POLO_TEST_SETTING", Some("from-toml")).as_deref(),
        Some("from-toml")
    );
    env::remove_var("POLO_TEST_SETTING");
}
