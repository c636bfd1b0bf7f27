//! HTTP transport with timeout and retry

pub mod client;

pub use client::{HttpClient, RetryPolicy};
