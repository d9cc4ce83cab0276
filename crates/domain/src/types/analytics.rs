use serde::{Deserialize, Serialize};

use super::{lenient_string, null_as_default};
use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl_domain_status_conversions!(StatsPeriod {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    #[serde(deserialize_with = "lenient_string")]
    pub period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub new_users: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_users: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_users: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueAnalytics {
    #[serde(deserialize_with = "lenient_string")]
    pub period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub growth: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub breakdown: RevenueBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueBreakdown {
    #[serde(deserialize_with = "null_as_default")]
    pub premium: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub platinum: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub commission: f64,
}
