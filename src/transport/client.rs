//! reqwest-backed executor.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Default executor for talking to `api.postmarkapp.com`.
///
/// Pooling, TLS and timeouts come from the wrapped `reqwest::Client`;
/// the Postmark client adds no deadline of its own. Response bodies are
/// buffered in full so bounce dumps can be streamed to a sink afterwards.
///
/// # Example
///
/// ```no_run
/// use postmark::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = ReqwestClient::new();
/// let url = Url::parse("https://api.postmarkapp.com/deliverystats")?;
/// let response = executor.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Executor with reqwest's defaults (rustls, no timeout).
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps a preconfigured reqwest client, e.g. one with a request timeout.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = req;

        let builder = self.inner.request(method, url.as_str()).headers(headers);
        let builder = match body {
            Some(payload) => builder.body(payload),
            None => builder,
        };

        let response = builder.send().await.map_err(classify_send_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

/// Timeout and builder failures get their own variants; the rest is
/// connection trouble.
fn classify_send_error(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else if error.is_builder() {
        HttpError::InvalidUrl(error.to_string())
    } else {
        HttpError::Connection(Box::new(error))
    }
}
