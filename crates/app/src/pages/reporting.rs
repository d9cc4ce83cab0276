//! Reporting page: report cards, history and period analytics.

use chrono::Utc;
use theradmin_core::view::{normalize_history, report_cards, ReportCard, ReportFilters};
use theradmin_domain::{ReportHistoryEntry, Result, RevenueAnalytics, StatsPeriod, UserStats};
use tracing::warn;

use super::PageError;
use crate::context::AppContext;
use crate::utils::execute_action;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsView {
    pub cards: Vec<ReportCard>,
    pub history: Vec<ReportHistoryEntry>,
    pub user_stats: Option<UserStats>,
    pub revenue: Option<RevenueAnalytics>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingPage {
    pub filters: ReportFilters,
    pub period: StatsPeriod,
}

impl Default for ReportingPage {
    fn default() -> Self {
        Self { filters: ReportFilters::default(), period: StatsPeriod::Monthly }
    }
}

/// A failed panel renders as not loaded instead of failing the page.
fn loaded<T>(panel: &str, result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        warn!(panel, error = %err, "report panel unavailable");
        None
    })
}

impl ReportingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, ctx: &AppContext) -> std::result::Result<ReportsView, PageError> {
        execute_action("reporting::load", || async {
            let queries = &ctx.queries;
            let activity = self.filters.activity_params();
            let financial = self.filters.financial_params();

            let (therapist, patient, money, history, stats, revenue) = futures::join!(
                queries.therapist_activity_report(&activity),
                queries.patient_activity_report(&activity),
                queries.financial_activity_report(&financial),
                queries.report_history(),
                queries.user_stats(self.period),
                queries.revenue_analytics(self.period),
            );

            let therapist = loaded("therapist_activity", therapist);
            let patient = loaded("patient_activity", patient);
            let money = loaded("financial_activity", money);
            let history = loaded("history", history.map(Some)).unwrap_or_default();

            Ok(ReportsView {
                cards: report_cards(therapist.as_deref(), patient.as_deref(), money.as_deref()),
                history: normalize_history(&history, Utc::now()),
                user_stats: loaded("user_stats", stats.map(Some)),
                revenue: loaded("revenue", revenue.map(Some)),
            })
        })
        .await
    }
}
