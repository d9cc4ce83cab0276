//! Write operations against the cache
//!
//! Mutations run exactly once. On success the listed key families are
//! invalidated and a success toast is shown; on failure the error message is
//! shown instead and nothing is invalidated.

use std::future::Future;

use theradmin_domain::Result;
use tracing::{debug, warn};

use super::client::QueryClient;
use super::key::QueryKey;
use crate::ports::Notifier;

/// What a successful mutation does to the cache and the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationEffects {
    pub invalidate: Vec<QueryKey>,
    pub toast: Option<String>,
}

impl MutationEffects {
    /// No invalidation, no toast.
    ///
    /// ```
    /// use theradmin_core::query::{keys, MutationEffects};
    ///
    /// let effects = MutationEffects::new()
    ///     .invalidate(keys::patients())
    ///     .toast("Patient updated successfully");
    /// assert_eq!(effects.invalidate, vec![keys::patients()]);
    /// assert_eq!(effects.toast.as_deref(), Some("Patient updated successfully"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every entry under `prefix` stale.
    #[must_use]
    pub fn invalidate(mut self, prefix: QueryKey) -> Self {
        self.invalidate.push(prefix);
        self
    }

    /// Success message shown once the effects apply.
    #[must_use]
    pub fn toast(mut self, message: impl Into<String>) -> Self {
        self.toast = Some(message.into());
        self
    }
}

/// Run `operation` once and apply its effects.
///
/// `effects` sees the result so it can, for example, key an invalidation on
/// an id the backend returned.
pub async fn run_mutation<T, Fut>(
    client: &QueryClient,
    notifier: &dyn Notifier,
    name: &str,
    operation: Fut,
    effects: impl FnOnce(&T) -> MutationEffects,
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match operation.await {
        Ok(value) => {
            let effects = effects(&value);
            for prefix in &effects.invalidate {
                client.invalidate_queries(prefix);
            }
            if let Some(message) = &effects.toast {
                notifier.success(message);
            }
            debug!(mutation = name, invalidated = effects.invalidate.len(), "mutation succeeded");
            Ok(value)
        }
        Err(err) => {
            warn!(mutation = name, error = %err, "mutation failed");
            notifier.error(&err.to_string());
            Err(err)
        }
    }
}
