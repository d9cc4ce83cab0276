use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use theradmin_core::TokenSource;
use theradmin_infra::{AdminApiService, HttpClient};
use wiremock::MockServer;

/// Token source with a fixed token that counts 401 notifications.
#[derive(Default)]
pub struct FixedToken {
    pub token: Option<String>,
    unauthorized: AtomicUsize,
}

impl FixedToken {
    pub fn new(token: &str) -> Arc<Self> {
        Arc::new(Self { token: Some(token.to_string()), ..Default::default() })
    }

    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for FixedToken {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }

    async fn on_unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
    }
}

/// Service pointed at the mock server, authenticated as `jwt-test`.
pub fn service(server: &MockServer) -> (AdminApiService, Arc<FixedToken>) {
    let tokens = FixedToken::new("jwt-test");
    let http = HttpClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(2))
        .token_source(tokens.clone())
        .build()
        .expect("http client should build");
    (AdminApiService::new(http), tokens)
}
