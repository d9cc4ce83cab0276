//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for theradmin
///
/// Messages are user-facing: the `Display` output is what a failure toast or
/// an error state shows. The variant carries the structured cause.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AdminError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response was received (unreachable host, timeout, aborted body).
    #[error("{0}")]
    Network(String),

    /// The session is no longer valid (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    /// A response arrived but carried no usable payload.
    #[error("{0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// HTTP status behind this error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Build the error for a failed envelope: 401 maps to
    /// [`AdminError::Unauthorized`], any other status to [`AdminError::Http`],
    /// no status to [`AdminError::Network`].
    pub fn from_status(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            Some(401) => Self::Unauthorized(message),
            Some(status) => Self::Http { status, message },
            None => Self::Network(message),
        }
    }
}

/// Result type alias for theradmin operations
pub type Result<T> = std::result::Result<T, AdminError>;
