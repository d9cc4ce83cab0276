//! # Theradmin Domain
//!
//! Types shared by every layer of the admin client.
//!
//! This crate contains:
//! - Server-shaped records (users, reports, dashboard counters, activity)
//! - Request payloads, including multipart form bodies
//! - The `ApiResponse` envelope, `AdminError` and the `Result` alias
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other theradmin crates
//! - Pure data and conversions, no I/O

pub mod config;
pub mod constants;
pub mod envelope;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use envelope::ApiResponse;
pub use errors::*;
pub use types::*;
