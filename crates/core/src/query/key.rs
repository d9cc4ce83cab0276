//! Composite cache keys
//!
//! A key is an entity family followed by discriminating parameters, e.g.
//! `reports / therapist-activity / {"from":..,"to":..}`. Invalidation works on
//! prefixes, so `users` covers every key under that family.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Key from its segments, outermost first.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Append a segment.
    #[must_use]
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Append a structured parameter as canonical JSON.
    ///
    /// Field order follows the type's declaration, so equal values always
    /// produce equal keys.
    #[must_use]
    pub fn with_param<P: Serialize>(self, param: &P) -> Self {
        let encoded = serde_json::to_string(param).unwrap_or_default();
        self.with(encoded)
    }

    /// The raw segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` matches this key's leading segments.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Key factory for every admin read.
pub mod keys {
    use theradmin_domain::{DashboardMetric, ReportKind, ReportParams, StatsPeriod};

    use super::QueryKey;

    /// Root of every dashboard read.
    pub fn dashboard() -> QueryKey {
        QueryKey::new(["dashboard"])
    }

    /// Aggregate dashboard payload.
    pub fn dashboard_data() -> QueryKey {
        dashboard().with("data")
    }

    /// Users who registered recently, either role.
    pub fn new_registered_users() -> QueryKey {
        dashboard().with("new-registered")
    }

    /// One scalar dashboard counter.
    pub fn metric(metric: DashboardMetric) -> QueryKey {
        dashboard().with(metric.key_segment())
    }

    /// Root of every user read; invalidating it covers both roles.
    pub fn users() -> QueryKey {
        QueryKey::new(["users"])
    }

    /// Therapist lists and searches.
    pub fn therapists() -> QueryKey {
        users().with("therapists")
    }

    /// Patient lists, searches and details.
    pub fn patients() -> QueryKey {
        users().with("patients")
    }

    /// Therapist search for `query`.
    pub fn search_therapists(query: &str) -> QueryKey {
        therapists().with("search").with(query)
    }

    /// Patient search for `query`.
    pub fn search_patients(query: &str) -> QueryKey {
        patients().with("search").with(query)
    }

    /// Ids sit under their own `id` segment so an id such as `search` or
    /// `new-registered` cannot collide with a sibling key.
    pub fn patient_by_id(id: &str) -> QueryKey {
        patients().with("id").with(id)
    }

    /// Patients who registered recently.
    pub fn new_registered_patients() -> QueryKey {
        patients().with("new-registered")
    }

    /// Detail key for a single user, whichever role.
    pub fn user(id: &str) -> QueryKey {
        QueryKey::new(["user", id])
    }

    /// Root of reports, history and analytics.
    pub fn reports() -> QueryKey {
        QueryKey::new(["reports"])
    }

    /// A generated report; the parameters are part of the key.
    pub fn report(kind: ReportKind, params: &ReportParams) -> QueryKey {
        reports().with(kind.segment()).with_param(params)
    }

    /// Previously generated reports.
    pub fn report_history() -> QueryKey {
        reports().with("history")
    }

    /// Activity feed capped at `limit` items.
    pub fn recent_activity(limit: u32) -> QueryKey {
        reports().with("recent-activity").with(limit.to_string())
    }

    /// User statistics for one period.
    pub fn user_stats(period: StatsPeriod) -> QueryKey {
        reports().with("user-stats").with(period.as_str())
    }

    /// Revenue analytics for one period.
    pub fn revenue_analytics(period: StatsPeriod) -> QueryKey {
        reports().with("revenue-analytics").with(period.as_str())
    }

    /// Root of profile reads.
    pub fn profile() -> QueryKey {
        QueryKey::new(["profile"])
    }

    /// The signed-in admin's own profile.
    pub fn admin_profile() -> QueryKey {
        profile().with("admin")
    }
}
