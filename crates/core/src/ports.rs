//! Port interfaces
//!
//! These traits define the boundaries between the admin client's logic and
//! the infrastructure that talks to the backend, persists the session and
//! shows notifications.

use async_trait::async_trait;
use theradmin_domain::{
    ActivityItem, AdminLoginRequest, AdminLoginResponse, AdminProfile, ApiResponse,
    ChangePasswordRequest, ChangePatientPasswordRequest, CreateAdminRequest, CreatePatientRequest,
    CreateTherapistRequest, DashboardData, DashboardMetric, ExportData, FinancialActivityReport,
    MessageResponse, PatientActivityReport, ReportHistoryItem, ReportParams,
    ResetPasswordRequest, Result, RevenueAnalytics, SendMessageRequest, StatsPeriod,
    SuspendUserRequest, TherapistActivityReport, UpdatePatientRequest, UpdateProfileRequest,
    UpdateTherapistRequest, UpdateUserRequest, User, UserStats, VerifyTherapistRequest,
};

use crate::session::StoredSession;

/// Typed admin backend.
///
/// Every method returns the response envelope and never fails: transport
/// errors, non-2xx statuses and malformed bodies all arrive as
/// `success == false` with an error message and, when known, the status.
/// Nothing here retries.
#[async_trait]
pub trait AdminApi: Send + Sync {
    // Authentication and profile
    async fn login(&self, request: &AdminLoginRequest) -> ApiResponse<AdminLoginResponse>;
    async fn create_admin(&self, request: &CreateAdminRequest) -> ApiResponse<AdminProfile>;
    async fn get_profile(&self, admin_id: Option<&str>) -> ApiResponse<AdminProfile>;
    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
        admin_id: Option<&str>,
    ) -> ApiResponse<AdminProfile>;
    async fn change_password(&self, request: &ChangePasswordRequest)
        -> ApiResponse<MessageResponse>;

    // Dashboard
    async fn get_dashboard_data(&self) -> ApiResponse<DashboardData>;
    async fn get_new_registered(&self) -> ApiResponse<Vec<User>>;
    /// One of the scalar dashboard counters.
    async fn get_metric(&self, metric: DashboardMetric) -> ApiResponse<f64>;

    async fn get_total_premium(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalPremium).await
    }
    async fn get_total_platinum(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalPlatinum).await
    }
    async fn get_total_users(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalUsers).await
    }
    async fn get_total_therapists(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalTherapists).await
    }
    async fn get_total_patients(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalPatients).await
    }
    async fn get_total_revenue(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::TotalRevenue).await
    }
    async fn get_monthly_revenue(&self) -> ApiResponse<f64> {
        self.get_metric(DashboardMetric::MonthlyRevenue).await
    }

    // Therapists
    async fn search_therapists(&self, query: &str) -> ApiResponse<Vec<User>>;
    /// Looks the therapist up through the search endpoint, so the payload is
    /// a list that may contain other matches.
    async fn get_therapist_by_id(&self, id: &str) -> ApiResponse<Vec<User>>;
    async fn get_all_therapists(&self) -> ApiResponse<Vec<User>>;
    async fn create_therapist(&self, request: &CreateTherapistRequest) -> ApiResponse<User>;
    async fn update_therapist(&self, request: &UpdateTherapistRequest) -> ApiResponse<User>;

    // Patients
    async fn search_patients(&self, query: &str) -> ApiResponse<Vec<User>>;
    async fn get_all_patients(&self) -> ApiResponse<Vec<User>>;
    async fn get_patient_by_id(&self, id: &str) -> ApiResponse<User>;
    async fn get_new_registered_patients(&self) -> ApiResponse<Vec<User>>;
    async fn create_patient(&self, request: &CreatePatientRequest) -> ApiResponse<User>;
    async fn update_patient(&self, request: &UpdatePatientRequest) -> ApiResponse<User>;
    async fn change_patient_password(
        &self,
        request: &ChangePatientPasswordRequest,
    ) -> ApiResponse<MessageResponse>;

    // User actions
    async fn verify_therapist(&self, request: &VerifyTherapistRequest)
        -> ApiResponse<MessageResponse>;
    async fn suspend_user(&self, request: &SuspendUserRequest) -> ApiResponse<MessageResponse>;
    async fn reset_user_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> ApiResponse<MessageResponse>;
    async fn send_message_to_user(
        &self,
        request: &SendMessageRequest,
    ) -> ApiResponse<MessageResponse>;
    async fn update_user(&self, request: &UpdateUserRequest) -> ApiResponse<MessageResponse>;

    // Reports
    async fn get_therapist_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<TherapistActivityReport>>;
    async fn get_patient_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<PatientActivityReport>>;
    /// Only the date range of `params` is sent.
    async fn get_financial_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<FinancialActivityReport>>;
    async fn get_report_history(&self) -> ApiResponse<Vec<ReportHistoryItem>>;

    // Analytics
    async fn get_recent_activity(&self, limit: u32) -> ApiResponse<Vec<ActivityItem>>;
    async fn get_user_stats(&self, period: StatsPeriod) -> ApiResponse<UserStats>;
    async fn get_revenue_analytics(&self, period: StatsPeriod) -> ApiResponse<RevenueAnalytics>;

    // Export
    async fn export_admin_data(&self) -> ApiResponse<ExportData>;
}

/// Persistence for the signed-in session (token plus admin profile).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, `None` when signed out.
    async fn load(&self) -> Result<Option<StoredSession>>;

    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Remove the persisted session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}

/// Source of the bearer token attached to outgoing requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Token for the next request, `None` when signed out.
    fn access_token(&self) -> Option<String>;

    /// The backend rejected the token (HTTP 401).
    async fn on_unauthorized(&self);
}

/// Transient user-facing notifications (toasts).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
