//! Application context - dependency injection container
//!
//! Holds the session, the backend client, the query cache and the toast sink.
//! Pages take `&AppContext` and never build their own dependencies.

use std::sync::Arc;

use parking_lot::Mutex;
use theradmin_core::{
    AdminApi, AdminQueries, QueryClient, QueryConfig, SessionEvent, SessionManager, SessionStore,
};
use theradmin_domain::{AdminError, Config, Result};
use theradmin_infra::{AdminApiService, FileSessionStore, HttpClient};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::notifier::ToastNotifier;

pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionManager>,
    pub api: Arc<dyn AdminApi>,
    pub queries: AdminQueries,
    pub notifier: Arc<ToastNotifier>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AppContext {
    /// Context backed by the session file named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(FileSessionStore::new(&config.session.path));
        Self::with_store(config, store)
    }

    /// Context with a caller-supplied session store.
    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = Arc::new(SessionManager::new(store));
        let http = HttpClient::from_config(&config.api, session.clone())?;
        let api: Arc<dyn AdminApi> = Arc::new(AdminApiService::new(http));
        Ok(Self::with_parts(config, session, api))
    }

    /// Assemble a context from already-built parts.
    pub fn with_parts(config: Config, session: Arc<SessionManager>, api: Arc<dyn AdminApi>) -> Self {
        let notifier = Arc::new(ToastNotifier::new());
        let client = QueryClient::new(QueryConfig::from(&config.cache));
        let queries = AdminQueries::new(Arc::clone(&api), client, notifier.clone());
        Self { config, session, api, queries, notifier, tasks: Mutex::new(Vec::new()) }
    }

    pub fn cache(&self) -> &QueryClient {
        self.queries.client()
    }

    /// Restore the persisted session and start background work.
    ///
    /// Returns whether a session was restored. Must run inside a Tokio
    /// runtime.
    pub async fn start(&self) -> Result<bool> {
        let listener = self.spawn_session_listener();
        let restored = self.session.hydrate().await?;
        let gc = self.cache().start_gc(self.config.cache.gc_interval());

        self.tasks.lock().extend([listener, gc]);
        info!(restored, base_url = %self.config.api.base_url, "theradmin context started");
        Ok(restored)
    }

    /// Fail with `Unauthorized` when nobody is signed in.
    pub fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AdminError::Unauthorized("Please sign in to continue".to_string()))
        }
    }

    /// Stop background tasks. Idempotent.
    pub fn shutdown(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        debug!("background tasks stopped");
    }

    /// Drop every cached query when the session ends, whatever the reason.
    fn spawn_session_listener(&self) -> JoinHandle<()> {
        let mut events = self.session.subscribe();
        let cache = self.cache().clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Ended { reason }) => {
                        let entries = cache.len();
                        cache.clear();
                        info!(?reason, entries, "session ended, cache cleared");
                    }
                    Ok(SessionEvent::Started { .. }) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "session events lagged, clearing cache");
                        cache.clear();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
