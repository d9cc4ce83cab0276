#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use theradmin_domain::{AdminProfile, Config};
use theradmin_infra::MemorySessionStore;
use theradmin_lib::AppContext;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointed at the mock backend, with fast retries.
pub fn config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_ms = 2_000;
    config.cache.retry_base_delay_ms = 1;
    config.cache.retry_max_delay_ms = 5;
    config
}

/// Context backed by an in-memory session store.
pub fn context(server: &MockServer) -> (AppContext, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let ctx = AppContext::with_store(config(server), store.clone())
        .expect("context should build against the mock server");
    (ctx, store)
}

pub fn admin() -> AdminProfile {
    AdminProfile {
        id: "1".into(),
        first_name: "Mary".into(),
        last_name: "Admin".into(),
        email: "mary@x.io".into(),
        ..Default::default()
    }
}

/// Context that is already signed in as [`admin`].
pub async fn signed_in(server: &MockServer) -> (AppContext, Arc<MemorySessionStore>) {
    let (ctx, store) = context(server);
    ctx.session.establish("jwt-test".into(), Some(admin())).await.unwrap();
    (ctx, store)
}

pub fn patients() -> Value {
    json!([
        { "id": 1, "fullName": "Ada Obi", "email": "ada@example.com", "active": "true",
          "city": "Lagos", "lastLogin": "2024-05-02" },
        { "id": 2, "fullName": "bola Ade", "email": "bola@example.com", "active": "false",
          "city": "Kano", "lastLogin": "2024-06-10" },
        { "id": 3, "fullName": "Chi Eze", "email": "chi@example.com", "active": true }
    ])
}

pub async fn mount_json(server: &MockServer, verb: &str, route: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Poll `condition` for up to a second.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
