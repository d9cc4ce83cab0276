//! Page action execution helpers
//!
//! Every user-triggered action goes through [`execute_action`] so timing and
//! outcome are logged the same way everywhere.

use std::future::Future;
use std::time::Instant;

use crate::pages::PageError;
use crate::utils::logging::{error_label, log_action};

/// Run a page action, timing it and logging the outcome.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn suspend(ctx: &AppContext, row: &UserRow) -> Result<(), PageError> {
///     execute_action("users::suspend", || async {
///         ctx.queries.suspend_user(request).await.map_err(PageError::from)
///     })
///     .await
/// }
/// ```
pub async fn execute_action<F, Fut, T>(action: &str, action_fn: F) -> Result<T, PageError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, PageError>>,
{
    let start = Instant::now();
    let result = action_fn().await;

    let outcome = result.as_ref().map(|_| ()).map_err(error_label);
    log_action(action, start.elapsed(), outcome);

    result
}
