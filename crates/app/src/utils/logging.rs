use std::time::Duration;

use theradmin_domain::AdminError;
use tracing::{info, warn};

use crate::pages::PageError;

/// Log the outcome of a page action with structured fields.
///
/// `action` must be a stable identifier such as `"users::suspend"`; never
/// pass form values through it.
#[inline]
pub fn log_action(action: &str, elapsed: Duration, outcome: Result<(), &'static str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    match outcome {
        Ok(()) => info!(action, duration_ms, "page_action_success"),
        Err(error_type) => warn!(action, duration_ms, error_type, "page_action_failure"),
    }
}

/// Stable label for a failure, suitable for logs.
#[inline]
pub fn error_label(error: &PageError) -> &'static str {
    match error {
        PageError::Invalid(_) => "invalid_input",
        PageError::Admin(err) => match err {
            AdminError::Http { .. } => "http",
            AdminError::Network(_) => "network",
            AdminError::Unauthorized(_) => "unauthorized",
            AdminError::Validation(_) => "validation",
            AdminError::Decode(_) => "decode",
            AdminError::Config(_) => "config",
            AdminError::Storage(_) => "storage",
            AdminError::NotFound(_) => "not_found",
            AdminError::Internal(_) => "internal",
        },
    }
}
