//! Dashboard KPI cards.

use theradmin_common::format::{format_currency, format_number};
use theradmin_domain::{DashboardData, DashboardMetric};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    /// Page the card opens, with its pre-applied filters.
    pub link: Option<&'static str>,
}

fn count(value: u64) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

/// Cards for the dashboard summary, in display order.
pub fn kpi_cards(data: &DashboardData) -> Vec<KpiCard> {
    vec![
        KpiCard {
            title: "Total Users",
            value: count(data.total_users),
            link: Some("/dashboard/user-management"),
        },
        KpiCard {
            title: "Therapists",
            value: count(data.total_therapists),
            link: Some("/dashboard/user-management?role=Therapist"),
        },
        KpiCard {
            title: "Patients",
            value: count(data.total_patients),
            link: Some("/dashboard/user-management?role=Patient"),
        },
        KpiCard {
            title: "New Registrations",
            value: count(data.new_registered),
            link: Some("/dashboard/user-management?role=Patient&filter=new"),
        },
        KpiCard {
            title: "Revenue",
            value: format_currency(data.total_revenue),
            link: Some("/dashboard/reporting?type=financial"),
        },
        KpiCard {
            title: "Monthly Revenue",
            value: format_currency(data.monthly_revenue),
            link: Some("/dashboard/reporting?type=financial"),
        },
        KpiCard { title: "Premium Subscribers", value: count(data.total_premium), link: None },
        KpiCard { title: "Platinum Subscribers", value: count(data.total_platinum), link: None },
    ]
}

/// Render a single counter the way its card would.
pub fn format_metric(metric: DashboardMetric, value: f64) -> String {
    if metric.is_currency() {
        format_currency(value)
    } else {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value.round() as i64;
        format_number(whole)
    }
}
