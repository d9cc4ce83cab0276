//! Reporting page figures: per-report totals, the summary line on each card
//! and normalised report history.

use chrono::{DateTime, SecondsFormat, Utc};
use theradmin_common::format::format_decimal;
use theradmin_domain::{
    FinancialActivityReport, PatientActivityReport, ReportHistoryEntry, ReportHistoryItem,
    ReportKind, ReportParams, TherapistActivityReport, UserRole, UserStatus,
};

use super::users::Filter;

pub const DEFAULT_REPORT_FROM: &str = "2024-01-01";
pub const DEFAULT_REPORT_TO: &str = "2024-12-31";
pub const LOADING_SUMMARY: &str = "Loading...";

/// Filter bar of the reporting page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportFilters {
    pub role: Filter<UserRole>,
    pub status: Filter<UserStatus>,
    pub location: Filter<String>,
    /// Empty means the default range start.
    pub date_from: String,
    pub date_to: String,
}

impl ReportFilters {
    /// Parameters for the activity reports. Status is sent lower-cased.
    pub fn activity_params(&self) -> ReportParams {
        let mut params = self.financial_params();
        if let Filter::Only(status) = &self.status {
            params = params.with_status(status.as_str().to_lowercase());
        }
        if let Filter::Only(location) = &self.location {
            params = params.with_location(location.clone());
        }
        params
    }

    /// The financial report only takes the date range.
    pub fn financial_params(&self) -> ReportParams {
        let from = if self.date_from.is_empty() { DEFAULT_REPORT_FROM } else { &self.date_from };
        let to = if self.date_to.is_empty() { DEFAULT_REPORT_TO } else { &self.date_to };
        ReportParams::new(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TherapistTotals {
    pub sessions: u64,
    pub cancellations: u64,
    /// Mean of the per-therapist ratings, 0 for an empty report.
    pub average_rating: f64,
}

impl TherapistTotals {
    /// Sum the rows of a therapist report.
    pub fn from_reports(reports: &[TherapistActivityReport]) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let average_rating = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| r.average_rating).sum::<f64>() / reports.len() as f64
        };
        Self {
            sessions: reports.iter().map(|r| r.sessions_completed).sum(),
            cancellations: reports.iter().map(|r| r.cancellations).sum(),
            average_rating,
        }
    }

    /// One-line footer for the report table.
    pub fn summary(&self) -> String {
        format!(
            "Sessions {} · Cancels {} · Rating {:.1}",
            self.sessions, self.cancellations, self.average_rating
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatientTotals {
    pub bookings: u64,
    pub cancellations: u64,
    pub reviews: u64,
}

impl PatientTotals {
    /// Sum the rows of a patient report.
    pub fn from_reports(reports: &[PatientActivityReport]) -> Self {
        Self {
            bookings: reports.iter().map(|r| r.bookings).sum(),
            cancellations: reports.iter().map(|r| r.cancellations).sum(),
            reviews: reports.iter().map(|r| r.reviews).sum(),
        }
    }

    /// One-line footer for the report table.
    pub fn summary(&self) -> String {
        format!(
            "Bookings {} · Cancels {} · Reviews {}",
            self.bookings, self.cancellations, self.reviews
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinancialTotals {
    pub payments: f64,
    pub refunds: f64,
    pub commission: f64,
}

impl FinancialTotals {
    /// Sum the rows of a financial report.
    pub fn from_reports(reports: &[FinancialActivityReport]) -> Self {
        Self {
            payments: reports.iter().map(|r| r.payments).sum(),
            refunds: reports.iter().map(|r| r.refunds).sum(),
            commission: reports.iter().map(|r| r.commission).sum(),
        }
    }

    /// One-line footer for the report table.
    pub fn summary(&self) -> String {
        format!(
            "Payments ${} · Refunds ${} · Commission ${}",
            format_decimal(self.payments),
            format_decimal(self.refunds),
            format_decimal(self.commission)
        )
    }
}

/// One card on the reporting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCard {
    pub kind: ReportKind,
    pub title: &'static str,
    pub value: String,
}

/// The three report cards; a report that has not loaded shows
/// [`LOADING_SUMMARY`].
pub fn report_cards(
    therapist: Option<&[TherapistActivityReport]>,
    patient: Option<&[PatientActivityReport]>,
    financial: Option<&[FinancialActivityReport]>,
) -> Vec<ReportCard> {
    let card = |kind: ReportKind, value: Option<String>| ReportCard {
        kind,
        title: kind.title(),
        value: value.unwrap_or_else(|| LOADING_SUMMARY.to_string()),
    };
    vec![
        card(
            ReportKind::TherapistActivity,
            therapist.map(|r| TherapistTotals::from_reports(r).summary()),
        ),
        card(ReportKind::PatientActivity, patient.map(|r| PatientTotals::from_reports(r).summary())),
        card(
            ReportKind::FinancialActivity,
            financial.map(|r| FinancialTotals::from_reports(r).summary()),
        ),
    ]
}

/// Normalise history records; entries without a timestamp get `now`.
pub fn normalize_history(items: &[ReportHistoryItem], now: DateTime<Utc>) -> Vec<ReportHistoryEntry> {
    let fallback = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    items.iter().map(|item| item.normalize(&fallback)).collect()
}
