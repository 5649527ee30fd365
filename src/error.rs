//! Error types returned by the Postmark client.

use std::fmt;

use thiserror::Error;

use crate::client::Response;
use crate::transport::HttpError;

/// Error type for every client operation.
///
/// Nothing is retried and nothing is logged by the library; each variant
/// describes exactly one failure stage so callers can decide what to do.
#[derive(Debug, Error)]
pub enum Error {
    /// The executor could not complete the round trip.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The backend URL or a request path could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A configured header value (user agent, token) is not valid.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// The request payload could not be serialized; nothing was sent.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A successful response body could not be parsed.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API answered with a non-2xx status and a body that is not a
    /// Postmark error envelope.
    #[error("{} malformed error body: {source}", .status.as_u16())]
    MalformedErrorBody {
        /// HTTP status of the response
        status: http::StatusCode,
        /// Headers of the response
        headers: http::HeaderMap,
        /// Why the body could not be parsed
        #[source]
        source: serde_json::Error,
    },

    /// Arguments failed a local precondition; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing a raw response body to the caller's sink failed.
    #[error("Failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status of the response, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::MalformedErrorBody { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Headers of the response, when one was received.
    #[must_use]
    pub const fn headers(&self) -> Option<&http::HeaderMap> {
        match self {
            Self::Api(api) => Some(&api.headers),
            Self::MalformedErrorBody { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// The response wrapper of a failed call, as far as it could be read.
    ///
    /// A malformed error body yields error code 0 and an empty message.
    #[must_use]
    pub fn response(&self) -> Option<Response> {
        match self {
            Self::Api(api) => Some(Response::from_parts(
                api.status,
                api.headers.clone(),
                api.error_code,
                api.message.clone(),
            )),
            Self::MalformedErrorBody {
                status, headers, ..
            } => Some(Response::from_parts(*status, headers.clone(), 0, String::new())),
            _ => None,
        }
    }

    /// The API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }
}

/// A non-2xx response from the Postmark API.
///
/// Renders as `"<status> <message>"`, e.g. `422 Invalid email`.
/// When the response had no body, `error_code` is 0 and `message` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Postmark's numeric error code (`ErrorCode`)
    pub error_code: i64,
    /// Human-readable message (`Message`)
    pub message: String,
    /// Response headers, e.g. request ids
    pub headers: http::HeaderMap,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// A caller-supplied argument violates a documented precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A batch send was requested with no messages.
    #[error("a batch must contain at least one email")]
    EmptyBatch,

    /// A listing asked for more records than one page may hold.
    #[error("page size {requested} exceeds the maximum of {max}")]
    PageSizeTooLarge {
        /// Requested page size
        requested: u32,
        /// Provider maximum
        max: u32,
    },
}
