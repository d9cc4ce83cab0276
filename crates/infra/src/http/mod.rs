//! Outbound HTTP with the envelope contract.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, RequestBody};
