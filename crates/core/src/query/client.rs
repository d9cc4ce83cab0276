//! Keyed query cache
//!
//! Every backend read goes through [`QueryClient::query`]. Results are cached
//! per [`QueryKey`], concurrent reads of one key share a single request, stale
//! entries are served immediately while a background refetch runs, and
//! mutations invalidate whole key families by prefix.
//!
//! Fetches run on their own task so a caller that stops waiting never cancels
//! a request other readers depend on. A fetch started before an invalidation
//! is detached: its result is discarded when it lands.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use theradmin_common::clock::{Clock, SystemClock};
use theradmin_domain::{AdminError, Result};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::key::QueryKey;
use super::policy::{self, QueryConfig};

type AnyData = Arc<dyn Any + Send + Sync>;
type FetchFuture = Shared<BoxFuture<'static, Result<AnyData>>>;
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<AnyData>> + Send + Sync>;

const EVENT_CAPACITY: usize = 256;

/// Per-query overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Apply the retry policy on failure.
    pub retry: bool,
    /// Freshness window, `None` for the client default.
    pub stale_time: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { retry: true, stale_time: None }
    }
}

impl QueryOptions {
    /// Fail on the first error instead of consulting the retry policy.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use theradmin_core::QueryOptions;
    ///
    /// let options = QueryOptions::no_retry().with_stale_time(Duration::from_secs(30));
    /// assert!(!options.retry);
    /// assert_eq!(options.stale_time, Some(Duration::from_secs(30)));
    /// ```
    pub fn no_retry() -> Self {
        Self { retry: false, ..Self::default() }
    }

    /// Override the client's freshness window for this query.
    #[must_use]
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }
}

/// Change notifications for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// New data or a new error landed.
    Updated(QueryKey),
    /// The entry was marked stale.
    Invalidated(QueryKey),
    /// The entry was dropped by `remove_queries`.
    Removed(QueryKey),
    /// The whole cache was emptied.
    Cleared,
}

impl QueryEvent {
    fn concerns(&self, key: &QueryKey) -> bool {
        match self {
            Self::Updated(k) | Self::Invalidated(k) | Self::Removed(k) => k == key,
            Self::Cleared => true,
        }
    }
}

/// Snapshot of one entry, as a view would render it.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<AdminError>,
    pub is_fetching: bool,
    pub is_stale: bool,
}

struct InFlight {
    id: u64,
    future: FetchFuture,
}

struct Entry {
    data: Option<AnyData>,
    error: Option<AdminError>,
    updated_at: Option<Instant>,
    invalidated: bool,
    in_flight: Option<InFlight>,
    observers: usize,
    idle_since: Instant,
    fetcher: Option<Fetcher>,
    options: QueryOptions,
}

impl Entry {
    fn new(now: Instant) -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            in_flight: None,
            observers: 0,
            idle_since: now,
            fetcher: None,
            options: QueryOptions::default(),
        }
    }

    fn is_stale(&self, now: Instant, default_stale_time: Duration) -> bool {
        match self.updated_at {
            Some(updated_at) => policy::is_stale(
                updated_at,
                now,
                self.options.stale_time.unwrap_or(default_stale_time),
                self.invalidated,
            ),
            None => true,
        }
    }
}

struct Inner {
    config: QueryConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<QueryKey, Entry>>,
    next_fetch_id: AtomicU64,
    events: broadcast::Sender<QueryEvent>,
}

/// Shared handle to the cache. Cloning is cheap; clones see the same entries.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl QueryClient {
    /// Client on the system clock.
    pub fn new(config: QueryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Client measuring freshness and idle time against `clock`.
    pub fn with_clock(config: QueryConfig, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                config,
                clock,
                entries: Mutex::new(HashMap::new()),
                next_fetch_id: AtomicU64::new(1),
                events,
            }),
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.inner.config
    }

    /// Read through the cache.
    ///
    /// Fresh data is returned as is. Stale data is returned immediately and a
    /// background refetch is started unless one is already running. With no
    /// data the caller waits for the (shared) fetch.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetcher = erase(fetch);
        let pending = {
            let mut entries = self.inner.entries.lock();
            let now = self.inner.clock.now();
            let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(now));
            entry.fetcher = Some(fetcher);
            entry.options = options;
            if entry.observers == 0 {
                entry.idle_since = now;
            }

            match entry.data.clone() {
                Some(data) => {
                    if entry.is_stale(now, self.inner.config.stale_time) && entry.in_flight.is_none()
                    {
                        debug!(%key, "serving stale data, refetching in background");
                        self.start_fetch(&key, entry);
                    } else {
                        trace!(%key, "cache hit");
                    }
                    return downcast(&key, data);
                }
                None => match &entry.in_flight {
                    Some(in_flight) => in_flight.future.clone(),
                    None => {
                        debug!(%key, "cache miss");
                        self.start_fetch(&key, entry).ok_or_else(no_runtime)?
                    }
                },
            }
        };

        let data = pending.await?;
        downcast(&key, data)
    }

    /// Fetch regardless of freshness, joining a request already in flight.
    pub async fn fetch_query<T, F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetch: F,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetcher = erase(fetch);
        let pending = {
            let mut entries = self.inner.entries.lock();
            let now = self.inner.clock.now();
            let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(now));
            entry.fetcher = Some(fetcher);
            entry.options = options;
            if entry.observers == 0 {
                entry.idle_since = now;
            }
            match &entry.in_flight {
                Some(in_flight) => in_flight.future.clone(),
                None => self.start_fetch(&key, entry).ok_or_else(no_runtime)?,
            }
        };

        let data = pending.await?;
        downcast(&key, data)
    }

    /// Current state of an entry without triggering any fetch.
    pub fn peek<T>(&self, key: &QueryKey) -> Option<QueryState<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.inner.entries.lock();
        let entry = entries.get(key)?;
        let now = self.inner.clock.now();
        Some(QueryState {
            data: entry.data.clone().and_then(|d| downcast(key, d).ok()),
            error: entry.error.clone(),
            is_fetching: entry.in_flight.is_some(),
            is_stale: entry.is_stale(now, self.inner.config.stale_time),
        })
    }

    /// Cached data for `key`, stale or not. Never fetches.
    ///
    /// `None` when nothing is cached or the entry holds another type.
    pub fn get_query_data<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let data = self.inner.entries.lock().get(key)?.data.clone()?;
        downcast(key, data).ok()
    }

    /// Write data directly, as a successful fetch would.
    pub fn set_query_data<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.inner.entries.lock();
        let now = self.inner.clock.now();
        let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(now));
        let data: AnyData = Arc::new(value);
        entry.data = Some(data);
        entry.error = None;
        entry.updated_at = Some(now);
        entry.invalidated = false;
        let _ = self.inner.events.send(QueryEvent::Updated(key));
    }

    /// Mark every entry under `prefix` stale.
    ///
    /// In-flight fetches for those entries are detached, and entries with
    /// observers are refetched right away. Returns the number of entries hit.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.inner.entries.lock();
        let mut hit = 0;
        for (key, entry) in entries.iter_mut().filter(|(k, _)| k.starts_with(prefix)) {
            hit += 1;
            entry.invalidated = true;
            entry.in_flight = None;
            let _ = self.inner.events.send(QueryEvent::Invalidated(key.clone()));
            if entry.observers > 0 && entry.fetcher.is_some() {
                self.start_fetch(key, entry);
            }
        }
        debug!(%prefix, entries = hit, "invalidated queries");
        hit
    }

    /// Drop every entry under `prefix`.
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.inner.entries.lock();
        let removed: Vec<QueryKey> =
            entries.keys().filter(|k| k.starts_with(prefix)).cloned().collect();
        for key in &removed {
            entries.remove(key);
            let _ = self.inner.events.send(QueryEvent::Removed(key.clone()));
        }
        removed.len()
    }

    /// Empty the cache, e.g. when the session ends.
    pub fn clear(&self) {
        let mut entries = self.inner.entries.lock();
        let count = entries.len();
        entries.clear();
        let _ = self.inner.events.send(QueryEvent::Cleared);
        debug!(entries = count, "query cache cleared");
    }

    /// Evict unobserved, idle entries older than the collection window.
    pub fn collect_garbage(&self) -> usize {
        let mut entries = self.inner.entries.lock();
        let now = self.inner.clock.now();
        let gc_time = self.inner.config.gc_time;
        let before = entries.len();
        entries.retain(|_, entry| {
            !policy::is_collectable(
                entry.observers,
                entry.in_flight.is_some(),
                entry.idle_since,
                now,
                gc_time,
            )
        });
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, "collected idle query entries");
        }
        evicted
    }

    /// Run [`Self::collect_garbage`] every `interval` until the last client
    /// handle is dropped.
    pub fn start_gc(&self, interval: Duration) -> JoinHandle<()> {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match weak.upgrade() {
                    Some(inner) => {
                        QueryClient { inner }.collect_garbage();
                    }
                    None => break,
                }
            }
        })
    }

    /// Register interest in `key`. Observed entries are never collected and
    /// are refetched as soon as they are invalidated.
    pub fn subscribe(&self, key: QueryKey) -> QueryObserver {
        {
            let mut entries = self.inner.entries.lock();
            let now = self.inner.clock.now();
            entries.entry(key.clone()).or_insert_with(|| Entry::new(now)).observers += 1;
        }
        QueryObserver { client: self.clone(), events: self.inner.events.subscribe(), key }
    }

    /// Number of cached entries, observed or idle.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry exists for exactly `key`.
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.entries.lock().contains_key(key)
    }

    fn release(&self, key: &QueryKey) {
        let mut entries = self.inner.entries.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.observers = entry.observers.saturating_sub(1);
            if entry.observers == 0 {
                entry.idle_since = self.inner.clock.now();
            }
        }
    }

    /// Spawn a fetch for `entry` and record it as in flight.
    ///
    /// Returns `None` outside a tokio runtime or when the entry has no
    /// fetcher yet.
    fn start_fetch(&self, key: &QueryKey, entry: &mut Entry) -> Option<FetchFuture> {
        let fetcher = entry.fetcher.clone()?;
        let handle = Handle::try_current().ok()?;
        let id = self.inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        let retry = entry.options.retry;
        let inner = Arc::clone(&self.inner);
        let task_key = key.clone();

        let task = handle.spawn(async move {
            let result = run_with_retry(&task_key, &fetcher, retry, &inner.config).await;
            QueryClient { inner }.finish_fetch(&task_key, id, &result);
            result
        });

        let future = async move {
            task.await.unwrap_or_else(|err| Err(AdminError::Internal(err.to_string())))
        }
        .boxed()
        .shared();

        entry.in_flight = Some(InFlight { id, future: future.clone() });
        Some(future)
    }

    fn finish_fetch(&self, key: &QueryKey, id: u64, result: &Result<AnyData>) {
        let mut entries = self.inner.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            trace!(%key, "fetch landed after entry was removed");
            return;
        };
        if entry.in_flight.as_ref().map(|f| f.id) != Some(id) {
            trace!(%key, "discarding detached fetch result");
            return;
        }

        let now = self.inner.clock.now();
        entry.in_flight = None;
        if entry.observers == 0 {
            entry.idle_since = now;
        }
        match result {
            Ok(data) => {
                entry.data = Some(Arc::clone(data));
                entry.error = None;
                entry.updated_at = Some(now);
                entry.invalidated = false;
            }
            Err(err) => {
                warn!(%key, error = %err, "query failed");
                entry.error = Some(err.clone());
            }
        }
        let _ = self.inner.events.send(QueryEvent::Updated(key.clone()));
    }
}

/// Live interest in one cache entry. Dropping it releases the entry.
pub struct QueryObserver {
    client: QueryClient,
    events: broadcast::Receiver<QueryEvent>,
    key: QueryKey,
}

impl QueryObserver {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Wait for the next change to this entry. `None` once the client is
    /// gone.
    pub async fn changed(&mut self) -> Option<QueryEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) if event.concerns(&self.key) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    return Some(QueryEvent::Updated(self.key.clone()));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Current snapshot of the observed entry.
    pub fn state<T>(&self) -> Option<QueryState<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.client.peek(&self.key)
    }
}

impl Drop for QueryObserver {
    fn drop(&mut self) {
        self.client.release(&self.key);
    }
}

fn erase<T, F, Fut>(fetch: F) -> Fetcher
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    Arc::new(move || {
        let fut = fetch();
        async move { fut.await.map(|value| Arc::new(value) as AnyData) }.boxed()
    })
}

fn downcast<T>(key: &QueryKey, data: AnyData) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    data.downcast::<T>()
        .map(|value| (*value).clone())
        .map_err(|_| AdminError::Internal(format!("cached value for {key} has a different type")))
}

fn no_runtime() -> AdminError {
    AdminError::Internal("query issued outside a tokio runtime".to_string())
}

async fn run_with_retry(
    key: &QueryKey,
    fetcher: &Fetcher,
    retry: bool,
    config: &QueryConfig,
) -> Result<AnyData> {
    let mut failures = 0u32;
    loop {
        match fetcher().await {
            Ok(data) => return Ok(data),
            Err(err) => {
                if !retry || !policy::should_retry(failures, &err) {
                    return Err(err);
                }
                let delay =
                    policy::retry_delay(failures, config.retry_base_delay, config.retry_max_delay);
                debug!(%key, attempt = failures + 1, ?delay, error = %err, "retrying query");
                failures += 1;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
