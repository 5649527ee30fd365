//! Credential-injecting executor decorator.

use std::fmt;
use std::str::FromStr;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue, InvalidHeaderValue};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Header carrying a server-scoped API token.
pub const SERVER_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-postmark-server-token");

/// Header carrying an account-scoped API token.
pub const ACCOUNT_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-postmark-account-token");

const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Scope of the API token, selecting which credential header is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionType {
    /// Server token: sending, bounces and templates of one server.
    #[default]
    Server,
    /// Account token: account-wide management endpoints.
    Account,
}

impl ConnectionType {
    /// Header this connection type authenticates with.
    #[must_use]
    pub const fn header_name(self) -> HeaderName {
        match self {
            Self::Server => SERVER_TOKEN_HEADER,
            Self::Account => ACCOUNT_TOKEN_HEADER,
        }
    }

    /// The credential header that must never accompany this one.
    const fn other_header_name(self) -> HeaderName {
        match self {
            Self::Server => ACCOUNT_TOKEN_HEADER,
            Self::Account => SERVER_TOKEN_HEADER,
        }
    }

    /// Lowercase name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Account => "account",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown connection type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connection type '{0}': expected server or account")]
pub struct ParseConnectionTypeError(String);

impl FromStr for ConnectionType {
    type Err = ParseConnectionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "account" => Ok(Self::Account),
            _ => Err(ParseConnectionTypeError(s.to_string())),
        }
    }
}

/// An API token bound to its connection type.
///
/// The token is validated as a header value on construction and marked
/// sensitive, so it is redacted from `Debug` output of headers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    connection_type: ConnectionType,
    token: HeaderValue,
}

impl Credentials {
    /// Creates credentials for the given connection type.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters not allowed in
    /// an HTTP header value.
    pub fn new(
        connection_type: ConnectionType,
        token: impl AsRef<str>,
    ) -> Result<Self, InvalidHeaderValue> {
        let mut token = HeaderValue::from_str(token.as_ref())?;
        token.set_sensitive(true);
        Ok(Self {
            connection_type,
            token,
        })
    }

    /// Server-token credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn server(token: impl AsRef<str>) -> Result<Self, InvalidHeaderValue> {
        Self::new(ConnectionType::Server, token)
    }

    /// Account-token credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn account(token: impl AsRef<str>) -> Result<Self, InvalidHeaderValue> {
        Self::new(ConnectionType::Account, token)
    }

    /// The configured connection type.
    #[must_use]
    pub const fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    fn apply(&self, headers: &mut http::HeaderMap) {
        headers.insert(ACCEPT, APPLICATION_JSON);
        headers.insert(CONTENT_TYPE, APPLICATION_JSON);
        headers.remove(self.connection_type.other_header_name());
        headers.insert(self.connection_type.header_name(), self.token.clone());
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("connection_type", &self.connection_type)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Executor decorator that authenticates every outgoing request.
///
/// Sets `Accept` and `Content-Type` to `application/json` and exactly one
/// credential header, overwriting any value the caller already set, then
/// hands the request to the wrapped executor once. Errors from the inner
/// executor are returned unchanged.
///
/// # Example
///
/// ```
/// use postmark::transport::{AuthTransport, Credentials, ReqwestClient};
///
/// let credentials = Credentials::server("server-token").unwrap();
/// let transport = AuthTransport::new(ReqwestClient::new(), credentials);
/// ```
#[derive(Debug, Clone)]
pub struct AuthTransport<H> {
    inner: H,
    credentials: Credentials,
}

impl<H> AuthTransport<H> {
    /// Wraps `inner`, authenticating with `credentials`.
    #[must_use]
    pub const fn new(inner: H, credentials: Credentials) -> Self {
        Self { inner, credentials }
    }

    /// The credentials attached to each request.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The wrapped executor.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: HttpClient> HttpClient for AuthTransport<H> {
    async fn request(&self, mut req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.credentials.apply(&mut req.headers);
        self.inner.request(req).await
    }
}
