//! Server-shaped records and request payloads
//!
//! Records the backend documents loosely keep every unknown field in an
//! `extra` map so they survive a round trip unchanged.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod form;
pub mod reports;
pub mod requests;
pub mod user;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use analytics::{RevenueAnalytics, RevenueBreakdown, StatsPeriod, UserStats};
pub use auth::{
    AdminLoginRequest, AdminLoginResponse, AdminProfile, ChangePasswordRequest,
    CreateAdminRequest, UpdateProfileRequest,
};
pub use dashboard::{DashboardData, DashboardMetric};
pub use form::{Attachment, FormPart, FormPayload, ToForm};
pub use reports::{
    ActivityItem, FinancialActivityReport, PatientActivityReport, ReportHistoryEntry,
    ReportHistoryItem, ReportKind, ReportParams, TherapistActivityReport,
};
pub use requests::{
    ChangePatientPasswordRequest, CreatePatientRequest, CreateTherapistRequest, ExportData,
    MessageChannel, MessageResponse, ResetPasswordRequest, SendMessageRequest, SuspendUserRequest,
    TherapistForm, UpdatePatientRequest, UpdateTherapistRequest, UpdateUserRequest,
    VerifyTherapistRequest,
};
pub use user::{User, UserRole, UserRow, UserStatus, UserType, VerificationStatus};

/// Identifier the backend sends as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Accept a JSON string, number or boolean as a `String`; `null` and absence
/// become the empty string.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_string`] but keeps `null` as `None`.
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Treat an explicit `null` like an absent field: the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional id that tolerates any JSON: strings and integers become a
/// [`RecordId`], anything else becomes `None`.
pub(crate) fn lenient_opt_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(RecordId::Text(s)),
        Some(serde_json::Value::Number(n)) => n.as_i64().map(RecordId::Number),
        _ => None,
    })
}
