//! Cache policies as pure functions over entry state.

use std::time::{Duration, Instant};

use theradmin_domain::{AdminError, CacheConfig};

/// Retries allowed for server errors, network failures and anything else
/// without a client-error status.
pub const MAX_RETRIES: u32 = 3;

/// Retries allowed for 408 Request Timeout and 429 Too Many Requests.
pub const MAX_THROTTLED_RETRIES: u32 = 2;

/// Timing knobs for a [`super::QueryClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for QueryConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            stale_time: config.stale_time(),
            gc_time: config.gc_time(),
            retry_base_delay: config.retry_base_delay(),
            retry_max_delay: config.retry_max_delay(),
        }
    }
}

/// Whether a read that has failed `failure_count` times before (0 on the
/// first failure) should try again.
///
/// 4xx responses are final except 408 and 429, which get two retries.
/// Everything else gets three.
pub fn should_retry(failure_count: u32, error: &AdminError) -> bool {
    match error.status() {
        Some(408 | 429) => failure_count < MAX_THROTTLED_RETRIES,
        Some(status) if (400..500).contains(&status) => false,
        _ => failure_count < MAX_RETRIES,
    }
}

/// Exponential backoff: `base * 2^failure_count`, capped at `max`.
pub fn retry_delay(failure_count: u32, base: Duration, max: Duration) -> Duration {
    let factor = 1u32.checked_shl(failure_count.min(16)).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(max)
}

/// Data is stale once the window has elapsed or it was invalidated.
pub fn is_stale(updated_at: Instant, now: Instant, stale_time: Duration, invalidated: bool) -> bool {
    invalidated || now.saturating_duration_since(updated_at) >= stale_time
}

/// An entry may be evicted when nobody observes it, nothing is in flight and
/// it has been idle for the whole window.
pub fn is_collectable(
    observers: usize,
    fetching: bool,
    idle_since: Instant,
    now: Instant,
    gc_time: Duration,
) -> bool {
    observers == 0 && !fetching && now.saturating_duration_since(idle_since) >= gc_time
}
