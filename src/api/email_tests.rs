//! Tests for email payloads and `EmailService`.

use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::client::Client;
use crate::error::{Error, ValidationError};
use crate::test_support::MockClient;

const SENT: &str = r#"{
    "To": "receiver@example.com",
    "SubmittedAt": "2014-02-17T07:25:01.4178645-05:00",
    "MessageID": "0a129aee-e1cd-480d-b08d-4f48548ff48d",
    "ErrorCode": 0,
    "Message": "OK"
}"#;

fn client_with(mock: &Arc<MockClient>) -> Client<Arc<MockClient>> {
    Client::builder(Arc::clone(mock))
        .backend_url("https://api.example.com")
        .build()
}

fn email() -> Email {
    Email::new("sender@example.com", "receiver@example.com")
        .with_subject("Test")
        .with_text_body("Hello")
}

mod payload {
    use super::*;

    #[test]
    fn serializes_with_provider_field_names_and_skips_unset_fields() {
        let email = email()
            .with_html_body("<b>Hello</b>")
            .with_track_opens(true)
            .with_header("X-Trace", "abc")
            .with_metadata("client-id", "12345");

        let value = serde_json::to_value(&email).unwrap();

        assert_eq!(
            value,
            json!({
                "From": "sender@example.com",
                "To": "receiver@example.com",
                "Subject": "Test",
                "HtmlBody": "<b>Hello</b>",
                "TextBody": "Hello",
                "Headers": [{"Name": "X-Trace", "Value": "abc"}],
                "TrackOpens": true,
                "Metadata": {"client-id": "12345"}
            })
        );
    }

    #[test]
    fn template_fields_serialize_as_template_id_and_model() {
        let email = Email::new("a@example.com", "b@example.com")
            .with_template(42, json!({"name": "Jack"}));

        let value = serde_json::to_value(&email).unwrap();

        assert_eq!(value["TemplateId"], 42);
        assert_eq!(value["TemplateModel"]["name"], "Jack");
    }

    #[test]
    fn payload_survives_encode_decode() {
        let email = email()
            .with_cc("cc@example.com")
            .with_reply_to("reply@example.com")
            .with_template(7, json!({"items": [1, 2]}))
            .with_attachment(EmailAttachment::new("a.txt", b"hi").with_content_type("text/plain"))
            .with_message_stream("outbound");

        let bytes = serde_json::to_vec(&email).unwrap();
        let decoded: Email = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, email);
    }

    #[test]
    fn uses_template_only_for_nonzero_id() {
        assert!(!email().uses_template());
        assert!(!email().with_template(0, json!({})).uses_template());
        assert!(email().with_template(1, json!({})).uses_template());
    }
}

mod attachment {
    use super::*;

    #[test]
    fn content_is_base64_encoded() {
        let attachment = EmailAttachment::new("hello.txt", b"Hello, world");

        assert_eq!(attachment.content, "SGVsbG8sIHdvcmxk");
        assert_eq!(attachment.decoded_content().unwrap(), b"Hello, world");
    }

    #[test]
    fn content_id_serializes_uppercase() {
        let attachment = EmailAttachment::new("logo.png", &[0x89, 0x50])
            .with_content_type("image/png")
            .with_content_id("cid:logo");

        let value = serde_json::to_value(&attachment).unwrap();

        assert_eq!(value["ContentID"], "cid:logo");
        assert_eq!(value["ContentType"], "image/png");
        assert_eq!(value["Name"], "logo.png");
    }

    #[test]
    fn invalid_base64_fails_to_decode() {
        let mut attachment = EmailAttachment::new("x", b"x");
        attachment.content = "***".to_string();

        assert!(attachment.decoded_content().is_err());
    }
}

mod send {
    use super::*;

    #[tokio::test]
    async fn plain_email_posts_to_email_path() {
        let mock = Arc::new(MockClient::replying(200, SENT));
        let client = client_with(&mock);

        let (sent, resp) = client.email().send(&email()).await.unwrap();

        let req = mock.last_request();
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url.as_str(), "https://api.example.com/email");
        assert_eq!(sent.message_id, "0a129aee-e1cd-480d-b08d-4f48548ff48d");
        assert_eq!(sent.to, "receiver@example.com");
        assert!(sent.submitted_at.is_some());
        assert_eq!(resp.message(), "OK");
    }

    #[tokio::test]
    async fn templated_email_posts_to_template_path() {
        let mock = Arc::new(MockClient::replying(200, SENT));
        let client = client_with(&mock);
        let email = Email::new("a@example.com", "b@example.com")
            .with_template(1234, json!({"product": "Widget"}));

        client.email().send(&email).await.unwrap();

        let req = mock.last_request();
        assert_eq!(
            req.url.as_str(),
            "https://api.example.com/email/withTemplate"
        );
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["TemplateId"], 1234);
    }

    #[tokio::test]
    async fn zero_template_id_sends_plain_email_without_template_fields() {
        let mock = Arc::new(MockClient::replying(200, SENT));
        let client = client_with(&mock);
        let email = email().with_template(0, json!({"k": 1}));

        client.email().send(&email).await.unwrap();

        let req = mock.last_request();
        assert_eq!(req.url.as_str(), "https://api.example.com/email");
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("TemplateId").is_none(), "{body}");
        assert!(body.get("TemplateModel").is_none(), "{body}");
        assert_eq!(body["Subject"], "Test");
    }

    #[tokio::test]
    async fn body_decodes_back_to_the_sent_email() {
        let mock = Arc::new(MockClient::replying(200, SENT));
        let client = client_with(&mock);
        let email = email().with_tag("welcome");

        client.email().send(&email).await.unwrap();

        let req = mock.last_request();
        let received: Email = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(received, email);
    }

    #[tokio::test]
    async fn rejection_surfaces_as_api_error() {
        let mock = Arc::new(MockClient::replying(
            422,
            r#"{"ErrorCode":300,"Message":"Invalid email"}"#,
        ));
        let client = client_with(&mock);

        let err = client.email().send(&email()).await.unwrap_err();

        assert_eq!(err.to_string(), "422 Invalid email");
        assert_eq!(err.as_api().unwrap().error_code, 300);
    }
}

mod send_batch {
    use super::*;

    #[tokio::test]
    async fn empty_batch_fails_without_network_call() {
        let mock = Arc::new(MockClient::default());
        let client = client_with(&mock);

        let err = client.email().send_batch(&[]).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::EmptyBatch)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn batch_entries_drop_zero_template_fields() {
        let mock = Arc::new(MockClient::replying(200, "[]"));
        let client = client_with(&mock);
        let emails = [
            email().with_template(0, json!({"k": 1})),
            email().with_template(9, json!({"k": 2})),
        ];

        client.email().send_batch(&emails).await.unwrap();

        let body: serde_json::Value =
            serde_json::from_slice(mock.last_request().body.as_deref().unwrap()).unwrap();
        assert!(body[0].get("TemplateId").is_none());
        assert!(body[0].get("TemplateModel").is_none());
        assert_eq!(body[1]["TemplateId"], 9);
        assert_eq!(body[1]["TemplateModel"], json!({"k": 2}));
    }

    #[tokio::test]
    async fn posts_array_to_batch_path() {
        let mock = Arc::new(MockClient::replying(
            200,
            r#"[
                {"ErrorCode":0,"Message":"OK","MessageID":"b7bc2f4a","SubmittedAt":"2010-11-26T12:01:05.1794748-05:00","To":"one@example.com"},
                {"ErrorCode":406,"Message":"You tried to send to a recipient that has been marked as inactive."}
            ]"#,
        ));
        let client = client_with(&mock);
        let emails = [
            Email::new("a@example.com", "one@example.com").with_text_body("1"),
            Email::new("a@example.com", "two@example.com").with_text_body("2"),
        ];

        let (results, resp) = client.email().send_batch(&emails).await.unwrap();

        let req = mock.last_request();
        assert_eq!(req.url.as_str(), "https://api.example.com/email/batch");
        let body: Vec<Email> = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, emails);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].error_code, 0);
        assert_eq!(results[1].error_code, 406);
        assert!(results[1].submitted_at.is_none());
        assert_eq!(resp.error_code(), 0);
    }
}
