//! Wire-level request and response values, and the executor seam.

use std::sync::Arc;

use super::HttpError;

/// One Postmark API call as handed to an executor.
///
/// Built by [`Client::new_request`](crate::Client::new_request) with the
/// URL already resolved against the backend. [`AuthTransport`](super::AuthTransport)
/// adds the credential headers just before the executor sends it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// GET, POST or PUT for the Postmark endpoints.
    pub method: http::Method,
    /// Backend URL joined with the endpoint path and query.
    pub url: url::Url,
    /// User agent plus, once authenticated, the JSON and token headers.
    pub headers: http::HeaderMap,
    /// Encoded JSON payload; `None` for GET and for `bounces/{id}/activate`.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    #[must_use]
    pub fn put(url: url::Url) -> Self {
        Self::new(http::Method::PUT, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets `name` to `value`; an earlier value under `name` is dropped.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// What the executor got back, before any status classification.
///
/// The body is read to the end, so the connection is released before the
/// pipeline decodes or streams it.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status as sent by the server; not yet classified.
    pub status: http::StatusCode,
    /// Kept on the `Response` wrapper and on API errors.
    pub headers: http::HeaderMap,
    /// Entire body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 200..=299.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as UTF-8, for logging and tests.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Performs one HTTP round trip for the Postmark client.
///
/// [`Client`](crate::Client) is generic over this trait and receives its
/// executor from the caller; there is no shared default instance.
/// [`ReqwestClient`](super::ReqwestClient) is the production executor and
/// [`AuthTransport`](super::AuthTransport) wraps any executor to add
/// credentials. Implementations must not retry.
///
/// # Example
///
/// ```ignore
/// use postmark::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// /// Answers every call with the same stored Postmark reply.
/// struct Replay(HttpResponse);
///
/// impl HttpClient for Replay {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` once and returns whatever status came back.
    ///
    /// # Errors
    ///
    /// [`HttpError`] only when no response was received.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Lets several clients share one executor and its connection pool.
impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
