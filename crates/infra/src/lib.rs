//! # Theradmin Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest HTTP client that shapes every outcome into an envelope
//! - `AdminApiService`, the typed admin backend
//! - File and in-memory session stores
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `theradmin-core`
//! - Contains all I/O: network, filesystem, environment

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::AdminApiService;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RequestBody};
pub use observability::init_tracing;
pub use session::{FileSessionStore, MemorySessionStore};
