//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use theradmin_domain::AdminError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AdminError);

impl From<InfraError> for AdminError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AdminError> for InfraError {
    fn from(value: AdminError) -> Self {
        InfraError(value)
    }
}

trait IntoAdminError {
    fn into_admin(self) -> AdminError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AdminError */
/* -------------------------------------------------------------------------- */

impl IntoAdminError for HttpError {
    fn into_admin(self) -> AdminError {
        if self.is_timeout() {
            return AdminError::Network("Network error: request timed out".into());
        }

        if self.is_connect() {
            return AdminError::Network(format!("Network error: connection failed ({self})"));
        }

        if self.is_builder() {
            return AdminError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return AdminError::from_status(
                Some(status.as_u16()),
                format!("Request failed with status code {}", status.as_u16()),
            );
        }

        AdminError::Network(format!("Network error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_admin())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → AdminError */
/* -------------------------------------------------------------------------- */

impl IntoAdminError for std::io::Error {
    fn into_admin(self) -> AdminError {
        match self.kind() {
            std::io::ErrorKind::NotFound => AdminError::NotFound(self.to_string()),
            _ => AdminError::Storage(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_admin())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AdminError */
/* -------------------------------------------------------------------------- */

impl IntoAdminError for serde_json::Error {
    fn into_admin(self) -> AdminError {
        AdminError::Storage(format!("invalid JSON: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_admin())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
