//! Monotonic time source for the query cache.
//!
//! Freshness and garbage-collection windows are measured against [`Clock`],
//! so cache tests can step time forward with [`MockClock`] instead of
//! sleeping.
//!
//! ```
//! use std::time::Duration;
//!
//! use theradmin_common::clock::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let fetched_at = clock.now();
//! clock.advance(Duration::from_secs(301));
//! assert_eq!(clock.since(fetched_at), Duration::from_secs(301));
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Time elapsed since `earlier`, zero if `earlier` lies in the future.
    fn since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Wall-clock [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share one offset: the copy handed to a cache and the copy kept by
/// the test advance together.
#[derive(Debug, Clone)]
pub struct MockClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self { origin: Instant::now(), offset: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }

    /// Total time advanced so far.
    #[must_use]
    pub fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.origin + self.offset()
    }
}
