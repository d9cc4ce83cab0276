//! # Theradmin Core
//!
//! Client-side logic of the admin console, free of HTTP and storage code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the backend, session storage and toasts
//! - The process-wide admin session
//! - The keyed query cache with its retry, staleness and invalidation rules
//! - The admin query/mutation catalogue built on that cache
//! - Pure view-state derivations for the pages
//!
//! ## Architecture Principles
//! - Only depends on `theradmin-common` and `theradmin-domain`
//! - All external effects go through the traits in [`ports`]

pub mod ports;
pub mod queries;
pub mod query;
pub mod session;
pub mod view;

pub use ports::{AdminApi, Notifier, SessionStore, TokenSource};
pub use queries::{AdminQueries, RecentActivity};
pub use query::{keys, QueryClient, QueryConfig, QueryKey, QueryOptions};
pub use session::{EndReason, SessionEvent, SessionManager, StoredSession};
