//! Activity reports, report history and the recent-activity feed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_opt_id, lenient_opt_string, lenient_string, null_as_default, RecordId};

/// Filters for an activity report. The parameter set is the report's
/// identity: it forms part of the cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportParams {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ReportParams {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into(), status: None, location: None }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Both ends of the date range are set.
    pub fn is_ready(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }

    /// Query pairs in `from, to, status, location` order, skipping empty
    /// values.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("from", Some(self.from.as_str())),
            ("to", Some(self.to.as_str())),
            ("status", self.status.as_deref()),
            ("location", self.location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
        .collect()
    }

    /// Only the date range; the financial report takes no other filter.
    pub fn date_range(&self) -> Self {
        Self::new(self.from.clone(), self.to.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    TherapistActivity,
    PatientActivity,
    FinancialActivity,
}

impl ReportKind {
    /// Path segment under `/admin/reports/` and cache-key segment under
    /// `reports`.
    pub fn segment(self) -> &'static str {
        match self {
            Self::TherapistActivity => "therapist-activity",
            Self::PatientActivity => "patient-activity",
            Self::FinancialActivity => "financial-activity",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TherapistActivity => "Therapist Activity",
            Self::PatientActivity => "Patient Activity",
            Self::FinancialActivity => "Financial Activity",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::TherapistActivity => "Failed to fetch therapist activity report",
            Self::PatientActivity => "Failed to fetch patient activity report",
            Self::FinancialActivity => "Failed to fetch financial activity report",
        }
    }
}

// Every report field accepts `null`; text fields also accept any scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TherapistActivityReport {
    #[serde(deserialize_with = "lenient_string")]
    pub therapist_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub therapist_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sessions_completed: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub cancellations: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientActivityReport {
    #[serde(deserialize_with = "lenient_string")]
    pub patient_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub patient_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bookings: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub cancellations: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub reviews: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialActivityReport {
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payments: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub refunds: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub commission: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub net_revenue: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A past report generation as the backend sends it. Deployments disagree
/// on field names, so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHistoryItem {
    pub id: RecordId,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// History row after the field-name variants are folded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHistoryEntry {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    pub created_by: String,
    pub file_url: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl ReportHistoryItem {
    /// Fold the alternative field names. `fallback_created_at` stands in
    /// when neither timestamp is present.
    pub fn normalize(&self, fallback_created_at: &str) -> ReportHistoryEntry {
        ReportHistoryEntry {
            id: self.id.clone(),
            kind: non_empty(self.kind.as_ref())
                .or_else(|| non_empty(self.report_type.as_ref()))
                .unwrap_or_else(|| "Unknown Report".to_string()),
            created_at: non_empty(self.created_at.as_ref())
                .or_else(|| non_empty(self.generated_at.as_ref()))
                .unwrap_or_else(|| fallback_created_at.to_string()),
            created_by: non_empty(self.created_by.as_ref())
                .or_else(|| non_empty(self.generated_by.as_ref()))
                .unwrap_or_else(|| "Unknown".to_string()),
            file_url: self.file_url.clone(),
            status: self.status.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// Entry of the recent-activity feed. Only a description and a timestamp
/// are expected; everything else is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(default, deserialize_with = "lenient_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityItem {
    pub fn text(&self) -> &str {
        self.description.as_deref().or(self.message.as_deref()).unwrap_or_default()
    }

    pub fn occurred_at(&self) -> Option<&str> {
        self.created_at.as_deref().or(self.timestamp.as_deref())
    }
}
