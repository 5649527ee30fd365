//! Tests for credential injection.

use std::sync::Arc;

use super::*;
use crate::test_support::{MockClient, response};

fn request() -> HttpRequest {
    HttpRequest::post(url::Url::parse("https://api.postmarkapp.com/email").unwrap())
}

mod connection_type {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("server".parse(), Ok(ConnectionType::Server));
        assert_eq!("Account".parse(), Ok(ConnectionType::Account));
        assert_eq!(" SERVER ".parse(), Ok(ConnectionType::Server));
    }

    #[test]
    fn rejects_unknown_values() {
        let err = "admin".parse::<ConnectionType>().unwrap_err();
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn header_names_match_provider() {
        assert_eq!(
            ConnectionType::Server.header_name().as_str(),
            "x-postmark-server-token"
        );
        assert_eq!(
            ConnectionType::Account.header_name().as_str(),
            "x-postmark-account-token"
        );
    }

    #[test]
    fn defaults_to_server() {
        assert_eq!(ConnectionType::default(), ConnectionType::Server);
    }
}

mod credentials {
    use super::*;

    #[test]
    fn rejects_token_with_control_characters() {
        assert!(Credentials::server("bad\ntoken").is_err());
    }

    #[test]
    fn debug_output_redacts_token() {
        let creds = Credentials::account("super-secret").unwrap();
        let debug = format!("{creds:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Account"));
    }
}

mod auth_transport {
    use super::*;

    async fn send_through(credentials: Credentials, req: HttpRequest) -> HttpRequest {
        let mock = Arc::new(MockClient::replying(200, "{}"));
        let transport = AuthTransport::new(Arc::clone(&mock), credentials);

        transport.request(req).await.unwrap();

        assert_eq!(mock.calls(), 1);
        mock.last_request()
    }

    #[tokio::test]
    async fn sets_json_headers() {
        let sent = send_through(Credentials::server("tok").unwrap(), request()).await;

        assert_eq!(sent.headers[http::header::ACCEPT], "application/json");
        assert_eq!(sent.headers[http::header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn exactly_one_credential_header_for_each_connection_type() {
        for connection_type in [ConnectionType::Server, ConnectionType::Account] {
            let creds = Credentials::new(connection_type, "tok").unwrap();
            let sent = send_through(creds, request()).await;

            let server = sent.headers.get_all(SERVER_TOKEN_HEADER).iter().count();
            let account = sent.headers.get_all(ACCOUNT_TOKEN_HEADER).iter().count();

            assert_eq!(server + account, 1, "{connection_type}");
            assert_eq!(sent.headers[connection_type.header_name()], "tok");
        }
    }

    #[tokio::test]
    async fn removes_preset_header_of_other_scope() {
        let req = request().with_header(
            SERVER_TOKEN_HEADER,
            http::HeaderValue::from_static("stale"),
        );

        let sent = send_through(Credentials::account("tok").unwrap(), req).await;

        assert!(!sent.headers.contains_key(SERVER_TOKEN_HEADER));
        assert_eq!(sent.headers[ACCOUNT_TOKEN_HEADER], "tok");
    }

    #[tokio::test]
    async fn overwrites_caller_preset_headers() {
        let req = request()
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(SERVER_TOKEN_HEADER, http::HeaderValue::from_static("old"));

        let sent = send_through(Credentials::server("new").unwrap(), req).await;

        assert_eq!(sent.headers[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(sent.headers.get_all(SERVER_TOKEN_HEADER).iter().count(), 1);
        assert_eq!(sent.headers[SERVER_TOKEN_HEADER], "new");
    }

    #[tokio::test]
    async fn leaves_method_url_and_body_untouched() {
        let req = request().with_body(b"{\"a\":1}".to_vec());

        let sent = send_through(Credentials::server("tok").unwrap(), req.clone()).await;

        assert_eq!(sent.method, req.method);
        assert_eq!(sent.url, req.url);
        assert_eq!(sent.body, req.body);
    }

    #[tokio::test]
    async fn propagates_inner_error_without_retry() {
        let mock = Arc::new(MockClient::new(vec![Err(HttpError::Timeout)]));
        let transport =
            AuthTransport::new(Arc::clone(&mock), Credentials::server("tok").unwrap());

        let result = transport.request(request()).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn passes_response_through() {
        let mock = MockClient::new(vec![Ok(response(422, "nope"))]);
        let transport = AuthTransport::new(mock, Credentials::server("tok").unwrap());

        let resp = transport.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp.body_text(), Some("nope"));
    }
}
