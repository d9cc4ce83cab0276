//! Page controllers
//!
//! Each module owns the local state of one console page and the actions the
//! page can trigger. Reads go through the cached query catalogue; writes go
//! through its mutations so invalidation and toasts stay consistent.

pub mod auth;
pub mod dashboard;
pub mod reporting;
pub mod settings;
pub mod users;

use theradmin_common::ValidationError;
use theradmin_domain::AdminError;
use thiserror::Error;

/// Why a page action did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// The form was rejected before any request; the draft is unchanged.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

impl PageError {
    /// Message for `field` when this is a form rejection.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Invalid(errors) => errors.message_for(field),
            Self::Admin(_) => None,
        }
    }

    pub fn admin_error(&self) -> Option<&AdminError> {
        match self {
            Self::Admin(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
