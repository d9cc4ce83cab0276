//! Application constants
//!
//! Endpoint paths, persisted-session keys and the fixed user-facing messages.

/// Backend endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/admin/login";
    pub const CREATE_ADMIN: &str = "/admin/create";
    pub const PROFILE: &str = "/admin/profile";
    pub const CHANGE_PASSWORD: &str = "/admin/change-password";
    pub const EXPORT_DATA: &str = "/admin/export-data";

    pub const DASHBOARD: &str = "/admin/get-dashboard";
    pub const TOTAL_PREMIUM: &str = "/admin/total-premium";
    pub const TOTAL_PLATINUM: &str = "/admin/total-platinum";
    pub const NEW_REGISTERED: &str = "/admin/new-registered";
    pub const TOTAL_USERS: &str = "/admin/total-users";
    pub const TOTAL_THERAPISTS: &str = "/admin/total-therapists";
    pub const TOTAL_PATIENTS: &str = "/admin/total-patients";
    pub const TOTAL_REVENUE: &str = "/admin/revenue";
    pub const MONTHLY_REVENUE: &str = "/admin/monthly-revenue";

    pub const SEARCH_THERAPIST: &str = "/admin/search-therapist";
    pub const ALL_THERAPISTS: &str = "/therapist/get-all";
    pub const THERAPIST_SIGNUP: &str = "/therapist/signup";
    pub const THERAPIST_UPDATE: &str = "/therapist/update";

    pub const SEARCH_PATIENT: &str = "/admin/search-patient";
    pub const ALL_PATIENTS: &str = "/patient/get-all";
    pub const PATIENT_BY_ID: &str = "/patient/get";
    pub const NEW_REGISTERED_PATIENTS: &str = "/patient/new-registered";
    pub const PATIENT_SIGNUP: &str = "/patient/signup";
    pub const PATIENT_UPDATE: &str = "/patient/update";
    pub const PATIENT_CHANGE_PASSWORD: &str = "/patient/change-password";

    pub const VERIFY_THERAPIST: &str = "/admin/verify-therapist";
    pub const SUSPEND_USER: &str = "/admin/suspend-user";
    pub const RESET_USER_PASSWORD: &str = "/admin/user/reset-password";
    pub const SEND_MESSAGE: &str = "/admin/user/send-message";

    pub const REPORTS: &str = "/admin/reports";
    pub const REPORT_HISTORY: &str = "/admin/reports/history";

    pub const RECENT_ACTIVITY: &str = "/admin/analytics/recent-activity";
    pub const USER_STATS: &str = "/admin/analytics/user-stats";
    pub const REVENUE_ANALYTICS: &str = "/admin/analytics/revenue";
}

/// Keys of the persisted session record.
pub mod storage_keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const USER_DATA: &str = "user_data";
}

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const UNAUTHORIZED_ERROR: &str = "You are not authorized to perform this action.";
pub const NOT_FOUND_ERROR: &str = "The requested resource was not found.";

pub const LOGIN_SUCCESS: &str = "Successfully logged in!";
pub const LOGOUT_SUCCESS: &str = "Successfully logged out!";

/// Recent-activity rows requested when the caller gives no limit.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;
