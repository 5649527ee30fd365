//! Response envelope and status classification.

use serde::Deserialize;

use crate::error::{ApiError, Error};
use crate::transport::HttpResponse;

/// Postmark's uniform `ErrorCode` / `Message` pair.
///
/// Both fields default when absent so the same shape reads success bodies,
/// error bodies and bodies that carry neither.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(rename = "ErrorCode", default)]
    error_code: i64,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Metadata of a completed API call.
///
/// Returned next to every decoded result. `error_code` and `message` are
/// read from the body when it is a JSON object; list-shaped bodies (such
/// as batch results) leave them at `0` and empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: http::StatusCode,
    headers: http::HeaderMap,
    error_code: i64,
    message: String,
}

impl Response {
    pub(crate) fn from_http(response: &HttpResponse) -> Self {
        let envelope = serde_json::from_slice::<Envelope>(&response.body).unwrap_or_default();
        Self::from_parts(
            response.status,
            response.headers.clone(),
            envelope.error_code,
            envelope.message,
        )
    }

    pub(crate) const fn from_parts(
        status: http::StatusCode,
        headers: http::HeaderMap,
        error_code: i64,
        message: String,
    ) -> Self {
        Self {
            status,
            headers,
            error_code,
            message,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> http::StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    /// Postmark error code; 0 means success.
    #[must_use]
    pub const fn error_code(&self) -> i64 {
        self.error_code
    }

    /// Postmark message accompanying the error code.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Classifies a response by HTTP status.
///
/// Statuses 200..=299 pass. Anything else becomes an [`ApiError`] built
/// from the body's error envelope and the response headers; an empty body
/// yields an error with code 0 and no message.
///
/// # Errors
///
/// - [`Error::Api`] for a non-2xx status
/// - [`Error::MalformedErrorBody`] when a non-2xx body is present but is
///   not a JSON error envelope; the HTTP status is kept
pub fn check_response(response: &HttpResponse) -> Result<(), Error> {
    let status = response.status;
    if status.is_success() {
        return Ok(());
    }

    let headers = response.headers.clone();
    let envelope = if response.body.is_empty() {
        Envelope::default()
    } else {
        match serde_json::from_slice::<Envelope>(&response.body) {
            Ok(envelope) => envelope,
            Err(source) => {
                return Err(Error::MalformedErrorBody {
                    status,
                    headers,
                    source,
                });
            }
        }
    };

    Err(ApiError {
        status,
        error_code: envelope.error_code,
        message: envelope.message,
        headers,
    }
    .into())
}
