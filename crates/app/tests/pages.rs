//! Dashboard, reporting and settings pages against a mock backend.

mod support;

use serde_json::json;
use theradmin_core::RecentActivity;
use theradmin_domain::{AdminError, ReportKind};
use theradmin_lib::pages::dashboard;
use theradmin_lib::pages::reporting::ReportingPage;
use theradmin_lib::pages::settings::{self, NewAdminForm, PasswordForm, ProfileForm};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_dashboard_renders_cards_without_activity_endpoint() {
    let server = MockServer::start().await;
    support::mount_json(
        &server,
        "GET",
        "/admin/get-dashboard",
        json!({
            "totalUsers": 1200, "totalTherapists": 85, "totalPatients": 1115,
            "totalRevenue": 89000.5, "monthlyRevenue": 7400, "newRegistered": 14
        }),
    )
    .await;
    support::mount_json(
        &server,
        "GET",
        "/admin/new-registered",
        json!([{ "id": 40, "fullName": "New Person", "role": "Therapist", "active": "true" }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics/recent-activity"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _) = support::signed_in(&server).await;
    let view = dashboard::load(&ctx).await.unwrap();

    assert_eq!(view.cards[0].title, "Total Users");
    assert_eq!(view.cards[0].value, "1,200");
    assert_eq!(view.cards[4].value, "$89,000.50");
    assert_eq!(view.new_users.len(), 1);
    assert_eq!(view.new_users[0].name, "New Person");
    assert_eq!(view.activity, RecentActivity::NotDeployed);
    assert!(view.activity.items().is_empty());
}

#[tokio::test]
async fn test_dashboard_fails_when_counters_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/get-dashboard"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden" })))
        .expect(1)
        .mount(&server)
        .await;
    support::mount_json(&server, "GET", "/admin/new-registered", json!([])).await;
    support::mount_json(&server, "GET", "/admin/analytics/recent-activity", json!([])).await;

    let (ctx, _) = support::signed_in(&server).await;
    let err = dashboard::load(&ctx).await.unwrap_err();
    assert_eq!(err.admin_error(), Some(&AdminError::Http { status: 403, message: "Forbidden".into() }));
}

#[tokio::test]
async fn test_reporting_page_loads_cards_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/reports/therapist-activity"))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("to", "2024-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "therapistId": "t1", "sessionsCompleted": 10, "cancellations": 1, "averageRating": 4.6 },
            { "therapistId": "t2", "sessionsCompleted": 6, "cancellations": 2, "averageRating": 4.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    // A failing report leaves its card in the loading state.
    Mock::given(method("GET"))
        .and(path("/admin/reports/patient-activity"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "bad filter" })))
        .mount(&server)
        .await;
    support::mount_json(
        &server,
        "GET",
        "/admin/reports/financial-activity",
        json!([{ "date": "2024-03-01", "payments": 1000.5, "refunds": 20, "commission": 150.25 }]),
    )
    .await;
    support::mount_json(
        &server,
        "GET",
        "/admin/reports/history",
        json!([
            { "id": 1, "reportType": "Financial", "generatedAt": "2024-06-01T10:00:00Z", "generatedBy": "Mary" },
            { "id": "rep-2" }
        ]),
    )
    .await;
    support::mount_json(
        &server,
        "GET",
        "/admin/analytics/user-stats",
        json!({ "period": "monthly", "newUsers": 40, "activeUsers": 300, "totalUsers": 1200 }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics/revenue"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (ctx, _) = support::signed_in(&server).await;
    let view = ReportingPage::new().load(&ctx).await.unwrap();

    assert_eq!(view.cards[0].kind, ReportKind::TherapistActivity);
    assert_eq!(view.cards[0].value, "Sessions 16 · Cancels 3 · Rating 4.3");
    assert_eq!(view.cards[1].value, "Loading...");
    assert_eq!(view.cards[2].value, "Payments $1,000.5 · Refunds $20 · Commission $150.25");

    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[0].kind, "Financial");
    assert_eq!(view.history[0].created_by, "Mary");
    assert_eq!(view.history[1].kind, "Unknown Report");
    assert_eq!(view.history[1].created_by, "Unknown");

    assert_eq!(view.user_stats.map(|s| s.new_users), Some(40));
    assert_eq!(view.revenue, None);
}

#[tokio::test]
async fn test_change_password_validates_then_uses_session_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/change-password"))
        .and(body_json(json!({
            "email": "mary@x.io", "currentPassword": "old-secret", "newPassword": "new-secret-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Changed" })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _) = support::signed_in(&server).await;
    let mismatch = PasswordForm {
        current_password: "old-secret".into(),
        new_password: "new-secret-1".into(),
        confirm_password: "new-secret-2".into(),
    };
    let err = settings::change_password(&ctx, &mismatch).await.unwrap_err();
    assert_eq!(err.field_message("confirmPassword"), Some("Passwords do not match"));

    let form = PasswordForm { confirm_password: "new-secret-1".into(), ..mismatch };
    settings::change_password(&ctx, &form).await.unwrap();
    assert_eq!(
        ctx.notifier.last().map(|t| t.message),
        Some("Password changed successfully".to_string())
    );
}

#[tokio::test]
async fn test_save_profile_refreshes_session_copy() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/profile"))
        .and(body_json(json!({ "firstName": "Maria", "lastName": "Admin", "email": "mary@x.io" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1", "firstName": "Maria", "lastName": "Admin", "email": "mary@x.io"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, store) = support::signed_in(&server).await;
    let mut form = ProfileForm::from(&support::admin());
    form.first_name = "Maria".into();

    let profile = settings::save_profile(&ctx, &form).await.unwrap();
    assert_eq!(profile.first_name, "Maria");
    assert_eq!(ctx.session.admin().map(|a| a.display_name()), Some("Maria Admin".to_string()));
    let stored = store.snapshot().and_then(|s| s.user_data).map(|a| a.first_name);
    assert_eq!(stored, Some("Maria".to_string()));
    assert_eq!(ctx.session.token().as_deref(), Some("jwt-test"));
}

#[tokio::test]
async fn test_create_admin_checks_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(201)).expect(0).mount(&server).await;

    let (ctx, _) = support::signed_in(&server).await;
    let form = NewAdminForm {
        email: "nope".into(),
        password: "short".into(),
        confirm_password: "other".into(),
        ..Default::default()
    };
    let err = settings::create_admin(&ctx, &form).await.unwrap_err();

    for field in ["firstName", "lastName", "email", "password", "confirmPassword"] {
        assert!(err.field_message(field).is_some(), "missing message for {field}");
    }
}

#[tokio::test]
async fn test_export_requires_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/export-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "downloadUrl": "https://files.example.com/export.zip" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _) = support::context(&server);
    let err = settings::export_data(&ctx).await.unwrap_err();
    assert!(matches!(err.admin_error(), Some(AdminError::Unauthorized(_))));

    ctx.session.establish("jwt-test".into(), Some(support::admin())).await.unwrap();
    let export = settings::export_data(&ctx).await.unwrap();
    assert_eq!(export.download_url.as_deref(), Some("https://files.example.com/export.zip"));
}

#[tokio::test]
async fn test_timed_out_read_is_retried_as_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/get-dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "totalUsers": 1 }))
                .set_delay(std::time::Duration::from_millis(400)),
        )
        .expect(4)
        .mount(&server)
        .await;

    let mut config = support::config(&server);
    config.api.timeout_ms = 50;
    let store = std::sync::Arc::new(theradmin_infra::MemorySessionStore::new());
    let ctx = theradmin_lib::AppContext::with_store(config, store).unwrap();
    ctx.session.establish("jwt-test".into(), Some(support::admin())).await.unwrap();

    let err = ctx.queries.dashboard_data().await.unwrap_err();
    assert_eq!(err, AdminError::Network("Network error: request timed out".into()));
    assert_eq!(err.status(), None);
}
