//! The uniform `{success, data?, message?, error?}` wrapper every admin call
//! returns, whatever the outcome.

use serde::{Deserialize, Serialize};

use crate::errors::AdminError;

/// Response envelope.
///
/// `status` is not part of the wire shape; the HTTP client records the
/// response status there so callers can branch on it without parsing the
/// error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None, error: None, status: None }
    }

    /// Successful envelope with no payload (e.g. `204 No Content`).
    pub fn empty() -> Self {
        Self { success: true, data: None, message: None, error: None, status: None }
    }

    /// Failed envelope.
    pub fn failure(error: impl Into<String>, status: Option<u16>) -> Self {
        Self { success: false, data: None, message: None, error: Some(error.into()), status }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Transform the payload, keeping the rest of the envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error: self.error,
            status: self.status,
        }
    }

    /// The error this envelope represents, using `fallback` when the backend
    /// gave no message.
    pub fn to_error(&self, fallback: &str) -> AdminError {
        let message = self
            .error
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();
        AdminError::from_status(self.status, message)
    }

    /// Payload of a successful envelope.
    ///
    /// A failed envelope or a successful one without data both become an
    /// error carrying the backend message or `fallback`.
    pub fn into_data(self, fallback: &str) -> Result<T, AdminError> {
        if !self.success {
            return Err(self.to_error(fallback));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(AdminError::Decode(
                self.error.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }

    /// For calls where only the outcome matters: the backend message on
    /// success, or the error.
    pub fn into_message(self, fallback: &str) -> Result<Option<String>, AdminError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(self.to_error(fallback))
        }
    }
}
