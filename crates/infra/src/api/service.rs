//! Typed admin backend over [`HttpClient`].
//!
//! One method per backend operation. Paths come from
//! [`theradmin_domain::constants::endpoints`]; user-supplied path segments are
//! percent-encoded. The form-shaped signup and update endpoints are sent as
//! multipart, everything else as JSON.

use std::borrow::Cow;

use async_trait::async_trait;
use theradmin_core::AdminApi;
use theradmin_domain::constants::endpoints;
use theradmin_domain::{
    ActivityItem, AdminLoginRequest, AdminLoginResponse, AdminProfile, ApiResponse,
    ChangePasswordRequest, ChangePatientPasswordRequest, CreateAdminRequest, CreatePatientRequest,
    CreateTherapistRequest, DashboardData, DashboardMetric, ExportData, FinancialActivityReport,
    MessageResponse, PatientActivityReport, ReportHistoryItem, ReportKind, ReportParams,
    ResetPasswordRequest, RevenueAnalytics, SendMessageRequest, StatsPeriod, SuspendUserRequest,
    TherapistActivityReport, ToForm, UpdatePatientRequest, UpdateProfileRequest,
    UpdateTherapistRequest, UpdateUserRequest, User, UserStats, UserType, VerifyTherapistRequest,
};
use tracing::instrument;

use crate::http::HttpClient;

/// [`AdminApi`] backed by the REST endpoints.
#[derive(Clone)]
pub struct AdminApiService {
    http: HttpClient,
}

impl AdminApiService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying transport.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    async fn report<T: serde::de::DeserializeOwned>(
        &self,
        kind: ReportKind,
        params: &ReportParams,
    ) -> ApiResponse<Vec<T>> {
        let path = format!("{}/{}", endpoints::REPORTS, kind.segment());
        self.http.get_with_query(&path, &params.query_pairs()).await
    }
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn with_optional_id(base: &str, id: Option<&str>) -> String {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => format!("{base}/{}", segment(id)),
        None => base.to_string(),
    }
}

#[async_trait]
impl AdminApi for AdminApiService {
    #[instrument(skip_all)]
    async fn login(&self, request: &AdminLoginRequest) -> ApiResponse<AdminLoginResponse> {
        self.http.post(endpoints::LOGIN, request).await
    }

    #[instrument(skip_all)]
    async fn create_admin(&self, request: &CreateAdminRequest) -> ApiResponse<AdminProfile> {
        self.http.post(endpoints::CREATE_ADMIN, request).await
    }

    async fn get_profile(&self, admin_id: Option<&str>) -> ApiResponse<AdminProfile> {
        self.http.get(&with_optional_id(endpoints::PROFILE, admin_id)).await
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
        admin_id: Option<&str>,
    ) -> ApiResponse<AdminProfile> {
        self.http.put(&with_optional_id(endpoints::PROFILE, admin_id), request).await
    }

    #[instrument(skip_all)]
    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.http.post(endpoints::CHANGE_PASSWORD, request).await
    }

    async fn get_dashboard_data(&self) -> ApiResponse<DashboardData> {
        self.http.get(endpoints::DASHBOARD).await
    }

    async fn get_new_registered(&self) -> ApiResponse<Vec<User>> {
        self.http.get(endpoints::NEW_REGISTERED).await
    }

    async fn get_metric(&self, metric: DashboardMetric) -> ApiResponse<f64> {
        self.http.get(metric.path()).await
    }

    #[instrument(skip(self))]
    async fn search_therapists(&self, query: &str) -> ApiResponse<Vec<User>> {
        self.http.get(&format!("{}/{}", endpoints::SEARCH_THERAPIST, segment(query))).await
    }

    #[instrument(skip(self))]
    async fn get_therapist_by_id(&self, id: &str) -> ApiResponse<Vec<User>> {
        self.http.get(&format!("{}/{}", endpoints::SEARCH_THERAPIST, segment(id))).await
    }

    async fn get_all_therapists(&self) -> ApiResponse<Vec<User>> {
        self.http.get(endpoints::ALL_THERAPISTS).await
    }

    #[instrument(skip_all)]
    async fn create_therapist(&self, request: &CreateTherapistRequest) -> ApiResponse<User> {
        self.http.post_form(endpoints::THERAPIST_SIGNUP, request.to_form()).await
    }

    #[instrument(skip_all, fields(id = %request.id))]
    async fn update_therapist(&self, request: &UpdateTherapistRequest) -> ApiResponse<User> {
        self.http.put_form(endpoints::THERAPIST_UPDATE, request.to_form()).await
    }

    #[instrument(skip(self))]
    async fn search_patients(&self, query: &str) -> ApiResponse<Vec<User>> {
        self.http.get(&format!("{}/{}", endpoints::SEARCH_PATIENT, segment(query))).await
    }

    async fn get_all_patients(&self) -> ApiResponse<Vec<User>> {
        self.http.get(endpoints::ALL_PATIENTS).await
    }

    #[instrument(skip(self))]
    async fn get_patient_by_id(&self, id: &str) -> ApiResponse<User> {
        self.http.get(&format!("{}/{}", endpoints::PATIENT_BY_ID, segment(id))).await
    }

    async fn get_new_registered_patients(&self) -> ApiResponse<Vec<User>> {
        self.http.get(endpoints::NEW_REGISTERED_PATIENTS).await
    }

    #[instrument(skip_all)]
    async fn create_patient(&self, request: &CreatePatientRequest) -> ApiResponse<User> {
        self.http.post_form(endpoints::PATIENT_SIGNUP, request.to_form()).await
    }

    #[instrument(skip_all, fields(id = %request.id))]
    async fn update_patient(&self, request: &UpdatePatientRequest) -> ApiResponse<User> {
        self.http.put_form(endpoints::PATIENT_UPDATE, request.to_form()).await
    }

    #[instrument(skip_all)]
    async fn change_patient_password(
        &self,
        request: &ChangePatientPasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.http.post(endpoints::PATIENT_CHANGE_PASSWORD, request).await
    }

    #[instrument(skip_all, fields(id = %request.therapist_id, verified = request.verified))]
    async fn verify_therapist(
        &self,
        request: &VerifyTherapistRequest,
    ) -> ApiResponse<MessageResponse> {
        let path = format!("{}/{}", endpoints::VERIFY_THERAPIST, segment(&request.therapist_id));
        self.http.put(&path, request).await
    }

    #[instrument(skip_all, fields(id = %request.user_id, suspended = request.suspended))]
    async fn suspend_user(&self, request: &SuspendUserRequest) -> ApiResponse<MessageResponse> {
        let path = format!("{}/{}", endpoints::SUSPEND_USER, segment(&request.user_id));
        self.http.put(&path, request).await
    }

    #[instrument(skip_all, fields(id = %request.user_id))]
    async fn reset_user_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.http.post(endpoints::RESET_USER_PASSWORD, request).await
    }

    #[instrument(skip_all, fields(id = %request.user_id))]
    async fn send_message_to_user(
        &self,
        request: &SendMessageRequest,
    ) -> ApiResponse<MessageResponse> {
        self.http.post(endpoints::SEND_MESSAGE, request).await
    }

    #[instrument(skip_all, fields(id = %request.id))]
    async fn update_user(&self, request: &UpdateUserRequest) -> ApiResponse<MessageResponse> {
        let path = match request.user_type {
            Some(UserType::Therapist) => endpoints::THERAPIST_UPDATE,
            Some(UserType::Patient) | None => endpoints::PATIENT_UPDATE,
        };
        self.http.put_form(path, request.to_form()).await
    }

    async fn get_therapist_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<TherapistActivityReport>> {
        self.report(ReportKind::TherapistActivity, params).await
    }

    async fn get_patient_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<PatientActivityReport>> {
        self.report(ReportKind::PatientActivity, params).await
    }

    async fn get_financial_activity_report(
        &self,
        params: &ReportParams,
    ) -> ApiResponse<Vec<FinancialActivityReport>> {
        self.report(ReportKind::FinancialActivity, &params.date_range()).await
    }

    async fn get_report_history(&self) -> ApiResponse<Vec<ReportHistoryItem>> {
        self.http.get(endpoints::REPORT_HISTORY).await
    }

    async fn get_recent_activity(&self, limit: u32) -> ApiResponse<Vec<ActivityItem>> {
        let limit = limit.to_string();
        self.http.get_with_query(endpoints::RECENT_ACTIVITY, &[("limit", limit.as_str())]).await
    }

    async fn get_user_stats(&self, period: StatsPeriod) -> ApiResponse<UserStats> {
        self.http.get_with_query(endpoints::USER_STATS, &[("period", period.as_str())]).await
    }

    async fn get_revenue_analytics(&self, period: StatsPeriod) -> ApiResponse<RevenueAnalytics> {
        self.http.get_with_query(endpoints::REVENUE_ANALYTICS, &[("period", period.as_str())]).await
    }

    async fn export_admin_data(&self) -> ApiResponse<ExportData> {
        self.http.get(endpoints::EXPORT_DATA).await
    }
}
