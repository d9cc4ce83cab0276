//! # Theradmin App
//!
//! Wires the layers together and exposes one controller per console page.
//!
//! - [`context`]: the dependency container built from [`theradmin_domain::Config`]
//! - [`pages`]: dashboard, user management, reporting, settings and auth
//! - [`notifier`]: the toast sink every mutation reports to

pub mod context;
pub mod notifier;
pub mod pages;
pub mod utils;

pub use context::AppContext;
pub use notifier::{Toast, ToastLevel, ToastNotifier};
pub use pages::PageError;
