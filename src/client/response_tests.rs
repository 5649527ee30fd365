//! Tests for status classification and the response envelope.

use super::*;
use crate::error::Error;
use crate::test_support::response;

mod check {
    use super::*;

    #[test]
    fn every_2xx_status_passes() {
        for status in [200, 201, 202, 204, 299] {
            assert!(check_response(&response(status, "")).is_ok(), "{status}");
        }
    }

    #[test]
    fn api_error_renders_status_and_message() {
        let resp = response(422, r#"{"ErrorCode":300,"Message":"Invalid email"}"#);

        let err = check_response(&resp).unwrap_err();

        assert_eq!(err.to_string(), "422 Invalid email");
        let api = err.as_api().unwrap();
        assert_eq!(api.status, http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.error_code, 300);
        assert_eq!(api.message, "Invalid email");
    }

    #[test]
    fn empty_error_body_still_yields_api_error() {
        let err = check_response(&response(503, "")).unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.status, http::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api.error_code, 0);
        assert!(api.message.is_empty());
        assert_eq!(err.to_string(), "503 ");
    }

    #[test]
    fn redirects_and_informational_statuses_are_errors() {
        for status in [101, 301, 304] {
            let err = check_response(&response(status, "")).unwrap_err();
            assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
        }
    }

    #[test]
    fn undecodable_error_body_keeps_http_status() {
        let err = check_response(&response(502, "<html>Bad Gateway</html>")).unwrap_err();

        assert!(matches!(
            err,
            Error::MalformedErrorBody { status, .. } if status == http::StatusCode::BAD_GATEWAY
        ));
        assert!(err.to_string().starts_with("502 malformed error body"));
    }

    #[test]
    fn undecodable_error_body_keeps_headers() {
        let mut resp = response(502, "<html>Bad Gateway</html>");
        resp.headers.insert(
            http::header::RETRY_AFTER,
            http::HeaderValue::from_static("30"),
        );

        let err = check_response(&resp).unwrap_err();

        let wrapper = err.response().unwrap();
        assert_eq!(wrapper.status(), http::StatusCode::BAD_GATEWAY);
        assert_eq!(wrapper.error_code(), 0);
        assert_eq!(wrapper.headers()[http::header::RETRY_AFTER], "30");
    }

    #[test]
    fn error_envelope_fields_are_optional() {
        let err = check_response(&response(401, r#"{"Message":"Bad token"}"#)).unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.error_code, 0);
        assert_eq!(err.to_string(), "401 Bad token");
    }
}

mod envelope {
    use super::*;

    #[test]
    fn reads_error_code_and_message_from_object_body() {
        let resp = response(200, r#"{"ErrorCode":0,"Message":"OK","To":"a@b.c"}"#);

        let envelope = Response::from_http(&resp);

        assert_eq!(envelope.status(), http::StatusCode::OK);
        assert_eq!(envelope.error_code(), 0);
        assert_eq!(envelope.message(), "OK");
    }

    #[test]
    fn list_body_leaves_defaults() {
        let envelope = Response::from_http(&response(200, r#"["a","b"]"#));

        assert_eq!(envelope.error_code(), 0);
        assert_eq!(envelope.message(), "");
    }

    #[test]
    fn keeps_response_headers() {
        let mut resp = response(200, "{}");
        resp.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        let envelope = Response::from_http(&resp);

        assert_eq!(
            envelope.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
