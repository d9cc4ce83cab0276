//! Configuration loader
//!
//! Loads application configuration from a file, then applies environment
//! overrides on top.
//!
//! ## Loading Strategy
//! 1. Probe the standard locations for a config file
//! 2. If none is found, start from [`Config::default`]
//! 3. Apply `THERADMIN_*` environment overrides
//!
//! ## Environment Variables
//! - `THERADMIN_API_URL`: Backend base URL
//! - `THERADMIN_API_TIMEOUT_MS`: Request timeout in milliseconds
//! - `THERADMIN_CACHE_STALE_SECS`: Seconds a read stays fresh
//! - `THERADMIN_CACHE_GC_SECS`: Seconds an unobserved entry survives
//! - `THERADMIN_SESSION_PATH`: Persisted session file
//! - `THERADMIN_LOG_LEVEL`: Default tracing filter
//! - `THERADMIN_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./theradmin.json` or `./theradmin.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names in the parent and grandparent directories

use std::path::{Path, PathBuf};

use theradmin_domain::{AdminError, Config, Result};

static FILE_STEMS: [&str; 2] = ["theradmin", "config"];
static EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration: file (if any), defaults otherwise, then environment
/// overrides.
///
/// # Errors
/// Returns `AdminError::Config` if a found file cannot be parsed or an
/// override has an invalid value.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension). Missing keys keep their defaults.
///
/// # Errors
/// Returns `AdminError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdminError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AdminError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AdminError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format follows the extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AdminError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AdminError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AdminError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(start: &Path) -> Option<PathBuf> {
    let found = start
        .ancestors()
        .take(3)
        .flat_map(|dir| {
            FILE_STEMS.iter().flat_map(move |stem| {
                EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}")))
            })
        })
        .find(|candidate| candidate.is_file());

    if let Some(path) = &found {
        tracing::debug!(path = %path.display(), "Found config file");
    }
    found
}

/// Apply `THERADMIN_*` variables from the process environment.
///
/// # Errors
/// Returns `AdminError::Config` when a numeric or boolean override cannot be
/// parsed.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup. Empty values are ignored.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = get("THERADMIN_API_URL") {
        config.api.base_url = url;
    }
    if let Some(ms) = get("THERADMIN_API_TIMEOUT_MS") {
        config.api.timeout_ms = parse_number("THERADMIN_API_TIMEOUT_MS", &ms)?;
    }
    if let Some(secs) = get("THERADMIN_CACHE_STALE_SECS") {
        config.cache.stale_time_secs = parse_number("THERADMIN_CACHE_STALE_SECS", &secs)?;
    }
    if let Some(secs) = get("THERADMIN_CACHE_GC_SECS") {
        config.cache.gc_time_secs = parse_number("THERADMIN_CACHE_GC_SECS", &secs)?;
    }
    if let Some(path) = get("THERADMIN_SESSION_PATH") {
        config.session.path = PathBuf::from(path);
    }
    if let Some(level) = get("THERADMIN_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = get("THERADMIN_LOG_JSON") {
        config.logging.json = parse_bool("THERADMIN_LOG_JSON", &json)?;
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|e| AdminError::Config(format!("Invalid {key}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AdminError::Config(format!("Invalid {key}: expected a boolean, got {value}"))),
    }
}
