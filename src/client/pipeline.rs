//! Request construction, execution and response decoding.

use std::io::Write;

use http::header::{HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ClientBuilder, Response, check_response};
use crate::Result;
use crate::api::{BounceService, EmailService, TemplateService};
use crate::error::Error;
use crate::transport::{
    AuthTransport, ConnectionType, Credentials, HttpClient, HttpRequest, HttpResponse,
    ReqwestClient,
};

/// Handle to the Postmark API.
///
/// Holds the executor, backend URL and user agent. All fields are fixed
/// after construction and every call builds its own request, so a client
/// can be shared freely between concurrent callers.
///
/// Resource methods live on the service handles returned by
/// [`email`](Self::email), [`bounce`](Self::bounce) and
/// [`template`](Self::template).
///
/// # Example
///
/// ```no_run
/// use postmark::{Client, Email, transport::ConnectionType};
///
/// # async fn example() -> Result<(), postmark::Error> {
/// let client = Client::with_token(ConnectionType::Server, "server-token")?;
///
/// let email = Email::new("sender@example.com", "receiver@example.com")
///     .with_subject("Hello")
///     .with_text_body("Hello from Postmark");
/// let (sent, _response) = client.email().send(&email).await?;
/// println!("{}", sent.message_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<H = AuthTransport<ReqwestClient>> {
    pub(super) http: H,
    pub(super) backend_url: String,
    pub(super) user_agent: String,
}

impl Client<AuthTransport<ReqwestClient>> {
    /// Creates a client with default settings that authenticates with
    /// `token` using a fresh reqwest executor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the token is not a valid
    /// header value.
    pub fn with_token(connection_type: ConnectionType, token: impl AsRef<str>) -> Result<Self> {
        let credentials = Credentials::new(connection_type, token)?;
        Ok(Self::new(AuthTransport::new(
            ReqwestClient::new(),
            credentials,
        )))
    }
}

impl<H> Client<H> {
    /// Creates a client with default settings around `http`.
    #[must_use]
    pub fn new(http: H) -> Self {
        ClientBuilder::new(http).build()
    }

    /// Starts a builder around `http`.
    #[must_use]
    pub fn builder(http: H) -> ClientBuilder<H> {
        ClientBuilder::new(http)
    }

    /// The configured executor.
    #[must_use]
    pub const fn http_client(&self) -> &H {
        &self.http
    }

    /// The configured backend URL, exactly as given.
    #[must_use]
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// The configured user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Email sending methods.
    #[must_use]
    pub const fn email(&self) -> EmailService<'_, H> {
        EmailService::new(self)
    }

    /// Bounce reporting methods.
    #[must_use]
    pub const fn bounce(&self) -> BounceService<'_, H> {
        BounceService::new(self)
    }

    /// Template retrieval methods.
    #[must_use]
    pub const fn template(&self) -> TemplateService<'_, H> {
        TemplateService::new(self)
    }

    /// Builds a request without a body.
    ///
    /// `path` is resolved against the backend URL with standard relative
    /// reference rules and may carry a query string, e.g.
    /// `bounces?count=10&offset=0`. The user agent header is always set.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the backend URL or `path` cannot be parsed
    /// - [`Error::InvalidHeader`] if the user agent is not a valid header value
    pub fn new_request(&self, method: http::Method, path: &str) -> Result<HttpRequest> {
        let url = url::Url::parse(&self.backend_url)?.join(path)?;
        let user_agent = HeaderValue::from_str(&self.user_agent)?;

        Ok(HttpRequest::new(method, url).with_header(USER_AGENT, user_agent))
    }

    /// Builds a request whose body is `body` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`new_request`](Self::new_request) returns, plus
    /// [`Error::Encode`] if `body` cannot be serialized.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: http::Method,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest> {
        let payload = serde_json::to_vec(body).map_err(Error::Encode)?;
        Ok(self.new_request(method, path)?.with_body(payload))
    }
}

impl<H: HttpClient> Client<H> {
    /// Sends `request` and decodes a successful JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Api`] / [`Error::MalformedErrorBody`] for a non-2xx status;
    ///   the body is not decoded into `T`
    /// - [`Error::Decode`] if a 2xx body does not match `T`
    pub async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<(T, Response)> {
        let (http_response, response) = self.round_trip(request).await?;
        let value = serde_json::from_slice(&http_response.body).map_err(Error::Decode)?;
        Ok((value, response))
    }

    /// Sends `request` and copies a successful body verbatim into `sink`.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), with [`Error::Io`] replacing
    /// [`Error::Decode`] when writing to `sink` fails.
    pub async fn execute_to<W: Write + ?Sized>(
        &self,
        request: HttpRequest,
        sink: &mut W,
    ) -> Result<Response> {
        let (http_response, response) = self.round_trip(request).await?;
        sink.write_all(&http_response.body)?;
        sink.flush()?;
        Ok(response)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<(HttpResponse, Response)> {
        tracing::debug!("Sending {} {}", request.method, request.url);

        let http_response = self.http.request(request).await?;

        tracing::debug!(
            "Received {} ({} bytes)",
            http_response.status,
            http_response.body.len()
        );

        check_response(&http_response)?;
        let response = Response::from_http(&http_response);
        Ok((http_response, response))
    }
}
