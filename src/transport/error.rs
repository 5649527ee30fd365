//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Produced by an [`HttpClient`](super::HttpClient) when no HTTP response
/// could be obtained at all. Non-2xx responses are not transport errors;
/// they are classified by the client core.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and failures while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the timeout configured on the
    /// underlying executor.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built by the executor.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
