//! Client construction with defaults and ordered overrides.

use super::Client;

/// Production Postmark API endpoint.
pub const DEFAULT_BACKEND_URL: &str = "https://api.postmarkapp.com/";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("postmark-rs/", env!("CARGO_PKG_VERSION"));

/// Builder for a [`Client`].
///
/// Starts from the defaults (production backend URL, [`DEFAULT_USER_AGENT`])
/// and the executor passed by the caller. Each setter overwrites exactly one
/// field; setters apply in call order, so a later call wins.
///
/// The backend URL is not validated here. A malformed value surfaces as
/// [`Error::Url`](crate::Error::Url) when the first request is built.
///
/// # Example
///
/// ```
/// use postmark::{Client, transport::ReqwestClient};
///
/// let client = Client::builder(ReqwestClient::new())
///     .backend_url("https://api.example.com/")
///     .user_agent("my-app/1.0")
///     .build();
///
/// assert_eq!(client.user_agent(), "my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder<H> {
    http: H,
    backend_url: String,
    user_agent: String,
}

impl<H> ClientBuilder<H> {
    /// Creates a builder around a caller-owned executor.
    #[must_use]
    pub fn new(http: H) -> Self {
        Self {
            http,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Replaces the executor.
    #[must_use]
    pub fn http_client<H2>(self, http: H2) -> ClientBuilder<H2> {
        ClientBuilder {
            http,
            backend_url: self.backend_url,
            user_agent: self.user_agent,
        }
    }

    /// Overrides the base URL that request paths are resolved against.
    #[must_use]
    pub fn backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    /// Overrides the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the client. Never fails.
    #[must_use]
    pub fn build(self) -> Client<H> {
        Client {
            http: self.http,
            backend_url: self.backend_url,
            user_agent: self.user_agent,
        }
    }
}
