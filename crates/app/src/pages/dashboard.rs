//! Dashboard summary page.

use theradmin_core::view::dashboard::{kpi_cards, KpiCard};
use theradmin_core::RecentActivity;
use theradmin_domain::constants::DEFAULT_ACTIVITY_LIMIT;
use theradmin_domain::{UserRole, UserRow};
use tracing::warn;

use super::PageError;
use crate::context::AppContext;
use crate::utils::execute_action;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<KpiCard>,
    pub new_users: Vec<UserRow>,
    pub activity: RecentActivity,
}

/// Load the KPI cards, newest registrations and recent activity.
///
/// The counters are required. The two side panels degrade to empty lists
/// when their reads fail.
pub async fn load(ctx: &AppContext) -> Result<DashboardView, PageError> {
    execute_action("dashboard::load", || async {
        let queries = &ctx.queries;
        let (data, new_users, activity) = futures::join!(
            queries.dashboard_data(),
            queries.new_registered_users(),
            queries.recent_activity(DEFAULT_ACTIVITY_LIMIT),
        );

        let data = data?;
        let new_users = new_users.unwrap_or_else(|err| {
            warn!(error = %err, "new registrations unavailable");
            Vec::new()
        });
        let activity = activity.unwrap_or_else(|err| {
            warn!(error = %err, "recent activity unavailable");
            RecentActivity::Available(Vec::new())
        });

        Ok(DashboardView {
            cards: kpi_cards(&data),
            new_users: new_users
                .iter()
                .map(|user| UserRow::from_user(user, user.parsed_role().unwrap_or(UserRole::Patient)))
                .collect(),
            activity,
        })
    })
    .await
}
