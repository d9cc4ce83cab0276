//! Admin backend adapter.

pub mod service;

pub use service::AdminApiService;
