//! The admin query catalogue against a scripted backend.

mod support;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use support::notifier::Toast;
use support::{MockAdminApi, RecordingNotifier};
use theradmin_core::{keys, AdminQueries, QueryClient, QueryConfig, RecentActivity};
use theradmin_domain::{
    AdminError, DashboardMetric, ReportParams, SuspendUserRequest, UpdatePatientRequest, UserType,
};

struct Harness {
    api: Arc<MockAdminApi>,
    notifier: Arc<RecordingNotifier>,
    queries: AdminQueries,
}

fn harness(api: MockAdminApi) -> Harness {
    let api = Arc::new(api);
    let notifier = Arc::new(RecordingNotifier::default());
    let client = QueryClient::new(QueryConfig {
        retry_base_delay: Duration::ZERO,
        retry_max_delay: Duration::ZERO,
        ..QueryConfig::default()
    });
    let queries = AdminQueries::new(api.clone(), client, notifier.clone());
    Harness { api, notifier, queries }
}

fn patient(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "fullName": name, "email": "p@example.com", "active": "true" })
}

/// Let background refetches started by stale reads finish.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_recent_activity_404_is_not_deployed() {
    let api = MockAdminApi::new();
    api.fail("get_recent_activity", 404, "Request failed with status code 404");
    let h = harness(api);

    let activity = h.queries.recent_activity(10).await.unwrap();
    assert_eq!(activity, RecentActivity::NotDeployed);
    assert!(activity.items().is_empty());
    assert_eq!(h.api.calls("get_recent_activity"), 1);
    assert!(h.notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_recent_activity_other_failures_surface_without_retry() {
    let api = MockAdminApi::new();
    api.fail("get_recent_activity", 500, "Internal Server Error");
    let h = harness(api);

    let err = h.queries.recent_activity(10).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(h.api.calls("get_recent_activity"), 1);
}

#[tokio::test]
async fn test_recent_activity_items() {
    let api = MockAdminApi::new();
    api.ok("get_recent_activity", json!([{ "id": "a1", "description": "New patient registered" }]));
    let h = harness(api);

    let activity = h.queries.recent_activity(5).await.unwrap();
    assert_eq!(activity.items()[0].text(), "New patient registered");
}

#[tokio::test]
async fn test_suspend_invalidates_user_list_and_detail() {
    let api = MockAdminApi::new();
    api.ok("get_all_patients", json!([patient("425", "Jane Smith")]));
    api.ok("get_patient_by_id", patient("425", "Jane Smith"));
    api.push("suspend_user", theradmin_domain::ApiResponse::ok(json!({ "message": "ok" })));
    let h = harness(api);

    h.queries.all_patients().await.unwrap();
    let user = h.queries.user_by_id("425").await.unwrap().unwrap();
    assert_eq!(user.role.as_deref(), Some("patient"));
    h.queries.all_patients().await.unwrap();
    assert_eq!(h.api.calls("get_all_patients"), 1);

    h.queries
        .suspend_user(SuspendUserRequest {
            user_id: "425".into(),
            user_type: UserType::Patient,
            suspended: true,
            reason: Some("Admin action".into()),
        })
        .await
        .unwrap();
    assert_eq!(h.notifier.last(), Some(Toast::Success("User suspended successfully".into())));
    assert_eq!(h.api.calls("suspend_user"), 1);

    h.queries.all_patients().await.unwrap();
    h.queries.user_by_id("425").await.unwrap();
    settle().await;
    assert_eq!(h.api.calls("get_all_patients"), 2);
    assert_eq!(h.api.calls("get_patient_by_id"), 2);
}

#[tokio::test]
async fn test_failed_mutation_toasts_error_and_keeps_cache() {
    let api = MockAdminApi::new();
    api.ok("get_all_patients", json!([]));
    api.fail("suspend_user", 500, "Database unavailable");
    let h = harness(api);

    h.queries.all_patients().await.unwrap();
    let err = h
        .queries
        .suspend_user(SuspendUserRequest {
            user_id: "1".into(),
            user_type: UserType::Patient,
            suspended: false,
            reason: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Database unavailable");
    assert_eq!(h.notifier.last(), Some(Toast::Error("Database unavailable".into())));
    assert_eq!(h.api.calls("suspend_user"), 1, "mutations never retry");
    assert!(!h.queries.client().peek::<Vec<theradmin_domain::User>>(&keys::patients()).unwrap().is_stale);
}

#[tokio::test]
async fn test_user_by_id_falls_back_to_therapist_search() {
    let api = MockAdminApi::new();
    api.fail("get_patient_by_id", 404, "Patient not found");
    api.ok(
        "get_therapist_by_id",
        json!([
            { "id": "4250", "fullName": "Other Match" },
            { "id": "425", "fullName": "Jane Smith", "verificationStatus": "verified" }
        ]),
    );
    let h = harness(api);

    let user = h.queries.user_by_id("425").await.unwrap().unwrap();
    assert_eq!(user.full_name, "Jane Smith");
    assert_eq!(user.role.as_deref(), Some("therapist"));
}

#[tokio::test]
async fn test_user_by_id_not_found() {
    let api = MockAdminApi::new();
    api.fail("get_patient_by_id", 404, "Patient not found");
    api.ok("get_therapist_by_id", json!([]));
    let h = harness(api);

    let err = h.queries.user_by_id("9").await.unwrap_err();
    assert_eq!(err, AdminError::NotFound("User not found".into()));
    assert_eq!(h.api.calls("get_patient_by_id"), 1);
    assert!(h.queries.user_by_id("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_disabled_reads_do_not_call_backend() {
    let h = harness(MockAdminApi::new());

    assert!(h.queries.search_therapists("").await.unwrap().is_none());
    assert!(h.queries.search_patients("").await.unwrap().is_none());
    assert!(h.queries.patient_by_id("").await.unwrap().is_none());
    let unset = ReportParams::new("", "2024-12-31");
    assert!(h.queries.therapist_activity_report(&unset).await.unwrap().is_none());
    assert!(h.queries.financial_activity_report(&unset).await.unwrap().is_none());

    assert_eq!(h.api.calls("search_therapists"), 0);
    assert_eq!(h.api.calls("get_therapist_activity_report"), 0);
    assert!(h.queries.client().is_empty());
}

#[tokio::test]
async fn test_reports_are_keyed_by_params() {
    let api = MockAdminApi::new();
    api.ok("get_patient_activity_report", json!([{ "patientId": "p1", "bookings": 3 }]));
    let h = harness(api);

    let all = ReportParams::new("2024-01-01", "2024-12-31");
    let active = all.clone().with_status("active");
    h.queries.patient_activity_report(&all).await.unwrap();
    h.queries.patient_activity_report(&all).await.unwrap();
    let reports = h.queries.patient_activity_report(&active).await.unwrap().unwrap();

    assert_eq!(reports[0].bookings, 3);
    assert_eq!(h.api.calls("get_patient_activity_report"), 2);
}

#[tokio::test]
async fn test_update_patient_invalidates_detail() {
    let api = MockAdminApi::new();
    api.ok("get_patient_by_id", patient("7", "Ada"));
    api.ok("update_patient", patient("7", "Ada Obi"));
    let h = harness(api);

    h.queries.patient_by_id("7").await.unwrap();
    let updated = h
        .queries
        .update_patient(UpdatePatientRequest {
            id: "7".into(),
            full_name: "Ada Obi".into(),
            email: "p@example.com".into(),
            active: "true".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Ada Obi");
    assert_eq!(h.notifier.last(), Some(Toast::Success("Patient updated successfully".into())));

    h.queries.patient_by_id("7").await.unwrap();
    settle().await;
    assert_eq!(h.api.calls("get_patient_by_id"), 2);
}

#[tokio::test]
async fn test_verify_toast_names_direction() {
    let api = MockAdminApi::new();
    api.ok("verify_therapist", json!({ "message": "done" }));
    let h = harness(api);

    h.queries.verify_therapist("12", false).await.unwrap();
    assert_eq!(h.notifier.last(), Some(Toast::Success("Therapist unverified successfully".into())));
}

#[tokio::test]
async fn test_metric_failure_uses_fallback_message() {
    let api = MockAdminApi::new();
    api.push(
        DashboardMetric::TotalUsers.key_segment(),
        theradmin_domain::ApiResponse { error: None, ..theradmin_domain::ApiResponse::failure("", Some(400)) },
    );
    let h = harness(api);

    let err = h.queries.metric(DashboardMetric::TotalUsers).await.unwrap_err();
    assert_eq!(err.to_string(), DashboardMetric::TotalUsers.failure_message());
}
