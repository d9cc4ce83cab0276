use theradmin_domain::{DashboardData, DashboardMetric, Result, User};

use super::AdminQueries;
use crate::query::{keys, QueryOptions};

impl AdminQueries {
    /// Aggregate counters and charts for the dashboard.
    pub async fn dashboard_data(&self) -> Result<DashboardData> {
        self.read(keys::dashboard_data(), QueryOptions::default(), |api| async move {
            api.get_dashboard_data().await.into_data("Failed to fetch dashboard data")
        })
        .await
    }

    pub async fn new_registered_users(&self) -> Result<Vec<User>> {
        self.read(keys::new_registered_users(), QueryOptions::default(), |api| async move {
            api.get_new_registered().await.into_data("Failed to fetch new registered users")
        })
        .await
    }

    /// One of the scalar counters shown on the dashboard.
    pub async fn metric(&self, metric: DashboardMetric) -> Result<f64> {
        self.read(keys::metric(metric), QueryOptions::default(), move |api| async move {
            api.get_metric(metric).await.into_data(metric.failure_message())
        })
        .await
    }
}
