//! `AdminApiService` against a mock backend: paths, methods, encodings and
//! envelope shaping.

mod support;

use std::time::Duration;

use serde_json::json;
use theradmin_core::AdminApi;
use theradmin_domain::{
    AdminError, AdminLoginRequest, Attachment, CreatePatientRequest, DashboardMetric,
    MessageChannel, RecordId, ReportParams, SendMessageRequest, StatsPeriod, SuspendUserRequest,
    UpdateProfileRequest, UpdateUserRequest, UserType, VerifyTherapistRequest,
};
use theradmin_infra::HttpClient;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .and(body_json(json!({ "email": "mary@x.io", "password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "admin": { "id": 1, "firstName": "Mary", "lastName": "Admin", "email": "mary@x.io" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let resp = api
        .login(&AdminLoginRequest { email: "mary@x.io".into(), password: "secret123".into() })
        .await;

    let login = resp.into_data("Login failed").unwrap();
    assert_eq!(login.token, "jwt-abc");
    assert_eq!(login.admin.id, "1");
}

#[tokio::test]
async fn test_metrics_hit_their_endpoints() {
    let server = MockServer::start().await;
    for (metric, value) in [(DashboardMetric::TotalRevenue, 89000.5), (DashboardMetric::TotalUsers, 1200.0)] {
        Mock::given(method("GET"))
            .and(path(metric.path()))
            .and(header("authorization", "Bearer jwt-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(value)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (api, _) = support::service(&server);
    assert_eq!(api.get_total_revenue().await.data, Some(89000.5));
    assert_eq!(api.get_total_users().await.data, Some(1200.0));
}

#[tokio::test]
async fn test_search_query_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/search-therapist/Dr.%20Emily%2FClark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "12", "fullName": "Dr. Emily Clark", "verificationStatus": "verified" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let users = api.search_therapists("Dr. Emily/Clark").await.into_data("x").unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].full_name, "Dr. Emily Clark");
}

#[tokio::test]
async fn test_patient_lookup_404_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patient/get/77"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Patient not found" })),
        )
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let err = api.get_patient_by_id("77").await.into_data("Failed to fetch patient").unwrap_err();
    assert_eq!(err, AdminError::Http { status: 404, message: "Patient not found".into() });
}

#[tokio::test]
async fn test_verify_and_suspend_put_to_id_paths() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/verify-therapist/12"))
        .and(body_json(json!({ "therapistId": "12", "verified": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Verified" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/suspend-user/425"))
        .and(body_json(json!({
            "userId": "425", "userType": "patient", "suspended": true, "reason": "Admin action"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Suspended" })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let verified = api
        .verify_therapist(&VerifyTherapistRequest { therapist_id: "12".into(), verified: true })
        .await;
    assert_eq!(verified.message.as_deref(), Some("Verified"));

    let suspended = api
        .suspend_user(&SuspendUserRequest {
            user_id: "425".into(),
            user_type: UserType::Patient,
            suspended: true,
            reason: Some("Admin action".into()),
        })
        .await;
    assert!(suspended.success);
}

#[tokio::test]
async fn test_send_message_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/user/send-message"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "userId": "9",
            "userType": "therapist",
            "messageType": "email",
            "subject": "Important Notice",
            "message": "Please update your documents"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Sent" })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let resp = api
        .send_message_to_user(&SendMessageRequest {
            user_id: "9".into(),
            user_type: UserType::Therapist,
            message_type: MessageChannel::Email,
            subject: "Important Notice".into(),
            message: "Please update your documents".into(),
        })
        .await;
    assert_eq!(resp.into_message("x").unwrap().as_deref(), Some("Sent"));
}

#[tokio::test]
async fn test_update_user_routes_by_type_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/therapist/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/patient/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let base = UpdateUserRequest {
        id: "5".into(),
        full_name: "Sam Lee".into(),
        email: "sam@example.com".into(),
        ..Default::default()
    };
    api.update_user(&UpdateUserRequest { user_type: Some(UserType::Therapist), ..base.clone() })
        .await;
    api.update_user(&base).await;

    for request in server.received_requests().await.unwrap() {
        let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
    }
}

#[tokio::test]
async fn test_create_patient_uploads_picture() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/patient/signup"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 31, "fullName": "Ada Obi" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let created = api
        .create_patient(&CreatePatientRequest {
            full_name: "Ada Obi".into(),
            email: "ada@example.com".into(),
            password: "longenough".into(),
            profile_picture: Some(Attachment::new("ada.jpg", vec![0xff, 0xd8])),
            ..Default::default()
        })
        .await
        .into_data("x")
        .unwrap();
    assert_eq!(created.id, "31");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"profilePicture\"; filename=\"ada.jpg\""));
}

#[tokio::test]
async fn test_reports_send_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/reports/therapist-activity"))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("to", "2024-12-31"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "therapistId": "t1", "sessionsCompleted": 12, "cancellations": 1, "averageRating": 4.5 }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/reports/financial-activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let params = ReportParams::new("2024-01-01", "2024-12-31")
        .with_status("active")
        .with_location("");
    let reports = api.get_therapist_activity_report(&params).await.into_data("x").unwrap();
    assert_eq!(reports[0].sessions_completed, 12);

    api.get_financial_activity_report(&params).await;

    let requests = server.received_requests().await.unwrap();
    let therapist_query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!therapist_query.contains("location"));
    let financial_query = requests[1].url.query().unwrap_or_default().to_string();
    assert_eq!(financial_query, "from=2024-01-01&to=2024-12-31");
}

#[tokio::test]
async fn test_analytics_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics/recent-activity"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics/user-stats"))
        .and(query_param("period", "weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": "weekly", "newUsers": 14, "activeUsers": 80, "totalUsers": 300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let activity = api.get_recent_activity(5).await;
    assert!(!activity.success);
    assert_eq!(activity.status, Some(404));

    let stats = api.get_user_stats(StatsPeriod::Weekly).await.into_data("x").unwrap();
    assert_eq!(stats.new_users, 14);
}

#[tokio::test]
async fn test_profile_paths_take_optional_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/profile/1"))
        .and(body_json(json!({ "timezone": "UTC+1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1", "timezone": "UTC+1" })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    assert_eq!(api.get_profile(None).await.into_data("x").unwrap().id, "1");

    let update = UpdateProfileRequest { timezone: Some("UTC+1".into()), ..Default::default() };
    assert!(api.update_profile(&update, Some("1")).await.success);
}

#[tokio::test]
async fn test_expired_token_notifies_once_per_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&server)
        .await;

    let (api, tokens) = support::service(&server);
    let resp = api.get_dashboard_data().await;

    assert_eq!(resp.error.as_deref(), Some("jwt expired"));
    assert!(matches!(resp.to_error("x"), AdminError::Unauthorized(_)));
    assert_eq!(tokens.unauthorized_count(), 1);
}

#[tokio::test]
async fn test_sparse_records_still_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics/recent-activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "description": "New patient registered", "createdAt": "2024-05-01", "userId": "64f1a2" },
            { "description": "Payment received", "createdAt": "2024-05-02", "userId": 427, "meta": "n/a" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/reports/therapist-activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "therapistId": "t1", "sessionsCompleted": 3, "cancellations": null, "averageRating": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = support::service(&server);
    let activity = api.get_recent_activity(10).await.into_data("x").unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].user_id, Some(RecordId::Text("64f1a2".into())));
    assert_eq!(activity[1].user_id, Some(RecordId::Number(427)));

    let params = ReportParams::new("2024-01-01", "2024-12-31");
    let rows = api.get_therapist_activity_report(&params).await.into_data("x").unwrap();
    assert_eq!(rows[0].sessions_completed, 3);
    assert_eq!(rows[0].cancellations, 0);
}

#[tokio::test]
async fn test_timeout_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/get-dashboard"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;

    let http = HttpClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let resp = http.get::<serde_json::Value>("/admin/get-dashboard").await;

    assert!(!resp.success);
    assert_eq!(resp.status, None);
    assert_eq!(resp.error.as_deref(), Some("Network error: request timed out"));
    assert!(matches!(resp.into_data("x"), Err(AdminError::Network(_))));
}
