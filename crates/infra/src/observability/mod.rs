//! Tracing subscriber setup
//!
//! Installs a global `tracing-subscriber` registry with an `EnvFilter` and a
//! human-readable or JSON formatter. `RUST_LOG` wins over the configured
//! level when it is set and valid.

use theradmin_domain::{AdminError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` first, then `config.level`.
///
/// # Errors
/// Returns `AdminError::Config` when the configured directive is invalid.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| AdminError::Config(format!("invalid log level '{}': {e}", config.level))),
    }
}

/// Install the global subscriber.
///
/// # Errors
/// Returns `AdminError::Config` when the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|e| AdminError::Config(format!("failed to install tracing subscriber: {e}")))
}
