//! Client configuration and the request/response pipeline.
//!
//! This module provides:
//! - The API handle ([`Client`]) and its builder ([`ClientBuilder`])
//! - Request construction relative to the backend URL
//! - Execution with JSON or raw-byte destinations
//! - Status classification into [`ApiError`](crate::ApiError) ([`check_response`])
//! - The per-call response envelope ([`Response`])

mod builder;
mod pipeline;
mod response;

#[cfg(test)]
mod response_tests;

pub use builder::{ClientBuilder, DEFAULT_BACKEND_URL, DEFAULT_USER_AGENT};
pub use pipeline::Client;
pub use response::{Response, check_response};
