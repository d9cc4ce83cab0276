use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use theradmin_core::AdminApi;
use theradmin_domain::{
    ActivityItem, AdminLoginRequest, AdminLoginResponse, AdminProfile, ApiResponse,
    ChangePasswordRequest, ChangePatientPasswordRequest, CreateAdminRequest, CreatePatientRequest,
    CreateTherapistRequest, DashboardData, DashboardMetric, ExportData, FinancialActivityReport,
    MessageResponse, PatientActivityReport, ReportHistoryItem, ReportParams,
    ResetPasswordRequest, RevenueAnalytics, SendMessageRequest, StatsPeriod, SuspendUserRequest,
    TherapistActivityReport, UpdatePatientRequest, UpdateProfileRequest, UpdateTherapistRequest,
    UpdateUserRequest, User, UserStats, VerifyTherapistRequest,
};

/// Scripted backend.
///
/// Each operation answers from its queue of scripted envelopes; the last one
/// repeats once the queue is down to it. Unscripted operations fail with 500.
#[derive(Default)]
pub struct MockAdminApi {
    scripts: Mutex<HashMap<String, VecDeque<ApiResponse<Value>>>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Mutex<Option<Duration>>,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&self, op: &str, data: Value) -> &Self {
        self.push(op, ApiResponse::ok(data))
    }

    pub fn fail(&self, op: &str, status: u16, error: &str) -> &Self {
        self.push(op, ApiResponse::failure(error, Some(status)))
    }

    pub fn push(&self, op: &str, response: ApiResponse<Value>) -> &Self {
        self.scripts.lock().entry(op.to_string()).or_default().push_back(response);
        self
    }

    /// Every call waits this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    async fn respond<T: DeserializeOwned>(&self, op: &str) -> ApiResponse<T> {
        *self.calls.lock().entry(op.to_string()).or_default() += 1;
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = {
            let mut scripts = self.scripts.lock();
            scripts.get_mut(op).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };
        let response = scripted
            .unwrap_or_else(|| ApiResponse::failure(format!("unscripted call: {op}"), Some(500)));

        let data = match response.data {
            Some(value) => match serde_json::from_value(value) {
                Ok(data) => Some(data),
                Err(err) => return ApiResponse::failure(err.to_string(), None),
            },
            None => None,
        };
        ApiResponse {
            success: response.success,
            data,
            message: response.message,
            error: response.error,
            status: response.status,
        }
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn login(&self, _request: &AdminLoginRequest) -> ApiResponse<AdminLoginResponse> {
        self.respond("login").await
    }

    async fn create_admin(&self, _request: &CreateAdminRequest) -> ApiResponse<AdminProfile> {
        self.respond("create_admin").await
    }

    async fn get_profile(&self, _admin_id: Option<&str>) -> ApiResponse<AdminProfile> {
        self.respond("get_profile").await
    }

    async fn update_profile(
        &self,
        _request: &UpdateProfileRequest,
        _admin_id: Option<&str>,
    ) -> ApiResponse<AdminProfile> {
        self.respond("update_profile").await
    }

    async fn change_password(
        &self,
        _request: &ChangePasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.respond("change_password").await
    }

    async fn get_dashboard_data(&self) -> ApiResponse<DashboardData> {
        self.respond("get_dashboard_data").await
    }

    async fn get_new_registered(&self) -> ApiResponse<Vec<User>> {
        self.respond("get_new_registered").await
    }

    async fn get_metric(&self, metric: DashboardMetric) -> ApiResponse<f64> {
        self.respond(metric.key_segment()).await
    }

    async fn search_therapists(&self, _query: &str) -> ApiResponse<Vec<User>> {
        self.respond("search_therapists").await
    }

    async fn get_therapist_by_id(&self, _id: &str) -> ApiResponse<Vec<User>> {
        self.respond("get_therapist_by_id").await
    }

    async fn get_all_therapists(&self) -> ApiResponse<Vec<User>> {
        self.respond("get_all_therapists").await
    }

    async fn create_therapist(&self, _request: &CreateTherapistRequest) -> ApiResponse<User> {
        self.respond("create_therapist").await
    }

    async fn update_therapist(&self, _request: &UpdateTherapistRequest) -> ApiResponse<User> {
        self.respond("update_therapist").await
    }

    async fn search_patients(&self, _query: &str) -> ApiResponse<Vec<User>> {
        self.respond("search_patients").await
    }

    async fn get_all_patients(&self) -> ApiResponse<Vec<User>> {
        self.respond("get_all_patients").await
    }

    async fn get_patient_by_id(&self, _id: &str) -> ApiResponse<User> {
        self.respond("get_patient_by_id").await
    }

    async fn get_new_registered_patients(&self) -> ApiResponse<Vec<User>> {
        self.respond("get_new_registered_patients").await
    }

    async fn create_patient(&self, _request: &CreatePatientRequest) -> ApiResponse<User> {
        self.respond("create_patient").await
    }

    async fn update_patient(&self, _request: &UpdatePatientRequest) -> ApiResponse<User> {
        self.respond("update_patient").await
    }

    async fn change_patient_password(
        &self,
        _request: &ChangePatientPasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.respond("change_patient_password").await
    }

    async fn verify_therapist(
        &self,
        _request: &VerifyTherapistRequest,
    ) -> ApiResponse<MessageResponse> {
        self.respond("verify_therapist").await
    }

    async fn suspend_user(&self, _request: &SuspendUserRequest) -> ApiResponse<MessageResponse> {
        self.respond("suspend_user").await
    }

    async fn reset_user_password(
        &self,
        _request: &ResetPasswordRequest,
    ) -> ApiResponse<MessageResponse> {
        self.respond("reset_user_password").await
    }

    async fn send_message_to_user(
        &self,
        _request: &SendMessageRequest,
    ) -> ApiResponse<MessageResponse> {
        self.respond("send_message_to_user").await
    }

    async fn update_user(&self, _request: &UpdateUserRequest) -> ApiResponse<MessageResponse> {
        self.respond("update_user").await
    }

    async fn get_therapist_activity_report(
        &self,
        _params: &ReportParams,
    ) -> ApiResponse<Vec<TherapistActivityReport>> {
        self.respond("get_therapist_activity_report").await
    }

    async fn get_patient_activity_report(
        &self,
        _params: &ReportParams,
    ) -> ApiResponse<Vec<PatientActivityReport>> {
        self.respond("get_patient_activity_report").await
    }

    async fn get_financial_activity_report(
        &self,
        _params: &ReportParams,
    ) -> ApiResponse<Vec<FinancialActivityReport>> {
        self.respond("get_financial_activity_report").await
    }

    async fn get_report_history(&self) -> ApiResponse<Vec<ReportHistoryItem>> {
        self.respond("get_report_history").await
    }

    async fn get_recent_activity(&self, _limit: u32) -> ApiResponse<Vec<ActivityItem>> {
        self.respond("get_recent_activity").await
    }

    async fn get_user_stats(&self, _period: StatsPeriod) -> ApiResponse<UserStats> {
        self.respond("get_user_stats").await
    }

    async fn get_revenue_analytics(&self, _period: StatsPeriod) -> ApiResponse<RevenueAnalytics> {
        self.respond("get_revenue_analytics").await
    }

    async fn export_admin_data(&self) -> ApiResponse<ExportData> {
        self.respond("export_admin_data").await
    }
}
