//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use theradmin_domain::AdminError;
use theradmin_infra::config;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write config file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "theradmin.json",
        r#"{
            "api": { "base_url": "https://api.example.com", "timeout_ms": 5000 },
            "cache": { "stale_time_secs": 120, "gc_time_secs": 240 },
            "session": { "path": "/var/lib/theradmin/session.json" },
            "logging": { "level": "debug", "json": true }
        }"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.api.base_url, "https://api.example.com");
    assert_eq!(config.api.timeout(), Duration::from_secs(5));
    assert_eq!(config.cache.stale_time(), Duration::from_secs(120));
    assert_eq!(config.cache.gc_time(), Duration::from_secs(240));
    assert_eq!(config.session.path, PathBuf::from("/var/lib/theradmin/session.json"));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "config.toml",
        r#"
[api]
base_url = "http://10.0.0.5:8085"

[cache]
retry_base_delay_ms = 250
"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.api.base_url, "http://10.0.0.5:8085");
    assert_eq!(config.api.timeout_ms, 10_000);
    assert_eq!(config.cache.retry_base_delay(), Duration::from_millis(250));
    assert_eq!(config.cache.stale_time_secs, 300);
    assert!(!config.logging.json);
}

#[test]
fn test_empty_object_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "theradmin.json", "{}");

    let config = config::load_from_file(Some(path)).unwrap();
    assert_eq!(config, theradmin_domain::Config::default());
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(AdminError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "config.json", r#"{ "this is": "not valid" "#);

    match config::load_from_file(Some(path)) {
        Err(AdminError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_wrong_value_type_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "config.toml", "[api]\ntimeout_ms = \"soon\"\n");

    match config::load_from_file(Some(path)) {
        Err(AdminError::Config(msg)) => assert!(msg.contains("Invalid TOML")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}
