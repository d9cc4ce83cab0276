//! Small utilities shared across theradmin crates.
//!
//! - [`clock`]: monotonic time behind a trait, with a
//!   controllable [`clock::MockClock`] for cache tests
//! - [`validation`]: client-side form checks that run before any request
//! - [`format`]: `en-US` number, currency and initials formatting

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod clock;
pub mod format;
pub mod validation;

pub use clock::{Clock, MockClock, SystemClock};
pub use validation::{FieldError, ValidationError, ValidationResult};
