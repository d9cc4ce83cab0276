use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::constants::endpoints;

/// Aggregate counters behind the dashboard KPI cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    #[serde(deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_therapists: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_patients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub monthly_revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_premium: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_platinum: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub new_registered: u64,
}

/// A single named counter with its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardMetric {
    TotalPremium,
    TotalPlatinum,
    TotalUsers,
    TotalTherapists,
    TotalPatients,
    TotalRevenue,
    MonthlyRevenue,
}

impl DashboardMetric {
    pub const ALL: [Self; 7] = [
        Self::TotalPremium,
        Self::TotalPlatinum,
        Self::TotalUsers,
        Self::TotalTherapists,
        Self::TotalPatients,
        Self::TotalRevenue,
        Self::MonthlyRevenue,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::TotalPremium => endpoints::TOTAL_PREMIUM,
            Self::TotalPlatinum => endpoints::TOTAL_PLATINUM,
            Self::TotalUsers => endpoints::TOTAL_USERS,
            Self::TotalTherapists => endpoints::TOTAL_THERAPISTS,
            Self::TotalPatients => endpoints::TOTAL_PATIENTS,
            Self::TotalRevenue => endpoints::TOTAL_REVENUE,
            Self::MonthlyRevenue => endpoints::MONTHLY_REVENUE,
        }
    }

    /// Cache-key segment under the `dashboard` family.
    pub fn key_segment(self) -> &'static str {
        match self {
            Self::TotalPremium => "total-premium",
            Self::TotalPlatinum => "total-platinum",
            Self::TotalUsers => "total-users",
            Self::TotalTherapists => "total-therapists",
            Self::TotalPatients => "total-patients",
            Self::TotalRevenue => "total-revenue",
            Self::MonthlyRevenue => "monthly-revenue",
        }
    }

    /// Message used when the backend gives none.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::TotalPremium => "Failed to fetch total premium count",
            Self::TotalPlatinum => "Failed to fetch total platinum count",
            Self::TotalUsers => "Failed to fetch total users count",
            Self::TotalTherapists => "Failed to fetch total therapists count",
            Self::TotalPatients => "Failed to fetch total patients count",
            Self::TotalRevenue => "Failed to fetch total revenue",
            Self::MonthlyRevenue => "Failed to fetch monthly revenue",
        }
    }

    /// Revenue metrics render as currency, the rest as counts.
    pub fn is_currency(self) -> bool {
        matches!(self, Self::TotalRevenue | Self::MonthlyRevenue)
    }
}
