//! Admin query and mutation catalogue
//!
//! One method per backend read, each bound to its cache key, retry policy and
//! failure message, plus the mutations with their invalidation sets and
//! toasts. Pages call these instead of the API directly.

mod dashboard;
mod profile;
mod reports;
mod users;

use std::future::Future;
use std::sync::Arc;

use theradmin_domain::Result;

pub use reports::RecentActivity;

use crate::ports::{AdminApi, Notifier};
use crate::query::{QueryClient, QueryKey, QueryOptions};

/// Cached access to the admin backend.
#[derive(Clone)]
pub struct AdminQueries {
    api: Arc<dyn AdminApi>,
    client: QueryClient,
    notifier: Arc<dyn Notifier>,
}

impl AdminQueries {
    /// Reads go through `client`; mutation outcomes are reported to `notifier`.
    pub fn new(api: Arc<dyn AdminApi>, client: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, client, notifier }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// The uncached backend.
    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    /// Cached read; `fetch` gets its own handle to the API on every attempt.
    async fn read<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Arc<dyn AdminApi>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        self.client.query(key, options, move || fetch(Arc::clone(&api))).await
    }
}
