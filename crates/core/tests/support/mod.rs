//! Shared test helpers for `theradmin-core` integration tests.
//!
//! A scriptable in-memory [`AdminApi`](theradmin_core::AdminApi) and a
//! notifier that records toasts, so tests can focus on cache behaviour.

#![allow(dead_code)]

pub mod api;
pub mod notifier;

pub use api::MockAdminApi;
pub use notifier::RecordingNotifier;
