use theradmin_domain::{
    ActivityItem, FinancialActivityReport, PatientActivityReport, ReportHistoryItem, ReportKind,
    ReportParams, Result, RevenueAnalytics, StatsPeriod, TherapistActivityReport, UserStats,
};
use tracing::warn;

use super::AdminQueries;
use crate::query::{keys, QueryOptions};

/// Outcome of the recent-activity read.
#[derive(Debug, Clone, PartialEq)]
pub enum RecentActivity {
    Available(Vec<ActivityItem>),
    /// The backend does not serve this endpoint (404). Render the empty
    /// state, not an error.
    NotDeployed,
}

impl RecentActivity {
    /// The items, empty when the endpoint is missing.
    pub fn items(&self) -> &[ActivityItem] {
        match self {
            Self::Available(items) => items,
            Self::NotDeployed => &[],
        }
    }
}

impl AdminQueries {
    /// `None` until both ends of the date range are set.
    pub async fn therapist_activity_report(
        &self,
        params: &ReportParams,
    ) -> Result<Option<Vec<TherapistActivityReport>>> {
        if !params.is_ready() {
            return Ok(None);
        }
        let kind = ReportKind::TherapistActivity;
        let owned = params.clone();
        self.read(keys::report(kind, params), QueryOptions::default(), move |api| {
            let params = owned.clone();
            async move {
                api.get_therapist_activity_report(&params).await.into_data(kind.failure_message())
            }
        })
        .await
        .map(Some)
    }

    /// `None` until both ends of the date range are set.
    pub async fn patient_activity_report(
        &self,
        params: &ReportParams,
    ) -> Result<Option<Vec<PatientActivityReport>>> {
        if !params.is_ready() {
            return Ok(None);
        }
        let kind = ReportKind::PatientActivity;
        let owned = params.clone();
        self.read(keys::report(kind, params), QueryOptions::default(), move |api| {
            let params = owned.clone();
            async move {
                api.get_patient_activity_report(&params).await.into_data(kind.failure_message())
            }
        })
        .await
        .map(Some)
    }

    /// Keyed on the date range only; status and location do not apply.
    pub async fn financial_activity_report(
        &self,
        params: &ReportParams,
    ) -> Result<Option<Vec<FinancialActivityReport>>> {
        if !params.is_ready() {
            return Ok(None);
        }
        let kind = ReportKind::FinancialActivity;
        let range = params.date_range();
        let key = keys::report(kind, &range);
        self.read(key, QueryOptions::default(), move |api| {
            let params = range.clone();
            async move {
                api.get_financial_activity_report(&params).await.into_data(kind.failure_message())
            }
        })
        .await
        .map(Some)
    }

    pub async fn report_history(&self) -> Result<Vec<ReportHistoryItem>> {
        self.read(keys::report_history(), QueryOptions::default(), |api| async move {
            api.get_report_history().await.into_data("Failed to fetch report history")
        })
        .await
    }

    /// Latest admin-visible events. A 404 resolves to
    /// [`RecentActivity::NotDeployed`]; nothing is retried.
    pub async fn recent_activity(&self, limit: u32) -> Result<RecentActivity> {
        self.read(keys::recent_activity(limit), QueryOptions::no_retry(), move |api| async move {
            match api.get_recent_activity(limit).await.into_data("Failed to fetch recent activity") {
                Ok(items) => Ok(RecentActivity::Available(items)),
                Err(err) if err.is_not_found() => {
                    warn!("recent activity endpoint not available");
                    Ok(RecentActivity::NotDeployed)
                }
                Err(err) => Err(err),
            }
        })
        .await
    }

    /// User statistics for `period`.
    pub async fn user_stats(&self, period: StatsPeriod) -> Result<UserStats> {
        self.read(keys::user_stats(period), QueryOptions::default(), move |api| async move {
            api.get_user_stats(period).await.into_data("Failed to fetch user stats")
        })
        .await
    }

    /// Revenue totals and breakdown for `period`.
    pub async fn revenue_analytics(&self, period: StatsPeriod) -> Result<RevenueAnalytics> {
        self.read(keys::revenue_analytics(period), QueryOptions::default(), move |api| async move {
            api.get_revenue_analytics(period).await.into_data("Failed to fetch revenue analytics")
        })
        .await
    }
}
