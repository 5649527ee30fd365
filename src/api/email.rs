//! Email sending.

use std::borrow::Cow;
use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::client::{Client, Response};
use crate::error::ValidationError;
use crate::transport::HttpClient;

const EMAIL_PATH: &str = "email";
const EMAIL_BATCH_PATH: &str = "email/batch";
const EMAIL_WITH_TEMPLATE_PATH: &str = "email/withTemplate";

/// A message to send.
///
/// Either carries its own content (`subject`, `html_body`, `text_body`) or
/// names a server template through `template_id`, in which case the
/// template is rendered with `template_model`.
///
/// # Example
///
/// ```
/// use postmark::Email;
///
/// let email = Email::new("sender@example.com", "receiver@example.com")
///     .with_subject("Welcome")
///     .with_html_body("<strong>Hello</strong>")
///     .with_tag("onboarding")
///     .with_track_opens(true);
///
/// assert!(!email.uses_template());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Email {
    /// Sender signature address, optionally with a display name.
    pub from: String,
    /// Recipients, comma-separated.
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    /// Ignored by the API when a template supplies the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Free-form label used to group messages in statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Server template to render; a non-zero id selects the template endpoint.
    #[serde(skip_serializing_if = "is_unset_template")]
    pub template_id: Option<i64>,
    /// Values substituted into the template; sent only with a template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_model: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Extra MIME headers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<EmailHeader>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
    /// Adds the open-tracking pixel; omitted from the payload when false.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub track_opens: bool,
    /// Stream to send through; the server's default transactional stream if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
    /// Key/value pairs echoed back in webhooks.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Email {
    /// Creates an email with sender and recipient(s).
    ///
    /// `to` may hold several comma-separated addresses.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    /// True when the message is rendered from a server template.
    #[must_use]
    pub fn uses_template(&self) -> bool {
        !is_unset_template(&self.template_id)
    }

    /// The payload actually posted: template fields are dropped unless
    /// the message renders a template.
    fn wire_form(&self) -> Cow<'_, Self> {
        if self.uses_template() || self.template_model.is_none() {
            return Cow::Borrowed(self);
        }

        let mut plain = self.clone();
        plain.template_id = None;
        plain.template_model = None;
        Cow::Owned(plain)
    }

    #[must_use]
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    #[must_use]
    pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Renders the message from template `template_id` using `model`.
    #[must_use]
    pub fn with_template(mut self, template_id: i64, model: serde_json::Value) -> Self {
        self.template_id = Some(template_id);
        self.template_model = Some(model);
        self
    }

    #[must_use]
    pub fn with_html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    #[must_use]
    pub fn with_text_body(mut self, text_body: impl Into<String>) -> Self {
        self.text_body = Some(text_body.into());
        self
    }

    #[must_use]
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Adds a custom message header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(EmailHeader {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub const fn with_track_opens(mut self, track_opens: bool) -> Self {
        self.track_opens = track_opens;
        self
    }

    #[must_use]
    pub fn with_message_stream(mut self, stream: impl Into<String>) -> Self {
        self.message_stream = Some(stream.into());
        self
    }

    /// Adds a metadata key/value pair; a repeated key overwrites.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if passes a reference
fn is_unset_template(template_id: &Option<i64>) -> bool {
    template_id.is_none_or(|id| id == 0)
}

/// A custom header on an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailHeader {
    pub name: String,
    pub value: String,
}

/// A file attached to an outgoing message.
///
/// `content` holds the file bytes base64-encoded, as the API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailAttachment {
    /// File name shown to the recipient.
    pub name: String,
    /// Base64 of the file bytes.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Set to reference the attachment inline as `cid:<id>`.
    #[serde(
        rename = "ContentID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_id: Option<String>,
}

impl EmailAttachment {
    /// Creates an attachment from raw file bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, content: &[u8]) -> Self {
        Self {
            name: name.into(),
            content: STANDARD.encode(content),
            content_type: None,
            content_id: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Decodes the base64 content back into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid base64.
    pub fn decoded_content(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content)
    }
}

/// Outcome of one submitted message.
///
/// In batch results a failed entry carries a non-zero `error_code` and no
/// `submitted_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmailResponse {
    pub to: String,
    pub submitted_at: Option<DateTime<FixedOffset>>,
    /// Id used to look up the message and its bounces later.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// 0 when the message was accepted.
    pub error_code: i64,
    pub message: String,
}

/// Email endpoints (`email`, `email/batch`, `email/withTemplate`).
#[derive(Debug)]
pub struct EmailService<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> EmailService<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> EmailService<'_, H> {
    /// Sends one email.
    ///
    /// Posts to `email/withTemplate` when [`Email::uses_template`] holds,
    /// otherwise to `email` without any template fields.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn send(&self, email: &Email) -> Result<(EmailResponse, Response)> {
        let path = if email.uses_template() {
            EMAIL_WITH_TEMPLATE_PATH
        } else {
            EMAIL_PATH
        };

        let request = self
            .client
            .new_json_request(http::Method::POST, path, &email.wire_form())?;
        self.client.execute(request).await
    }

    /// Sends several emails in one request to `email/batch`.
    ///
    /// Results are returned in submission order; inspect each entry's
    /// `error_code`, as the call succeeds even if some messages were rejected.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyBatch`] without any network call when
    /// `emails` is empty, otherwise as [`send`](Self::send).
    pub async fn send_batch(&self, emails: &[Email]) -> Result<(Vec<EmailResponse>, Response)> {
        if emails.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }

        let payload: Vec<Cow<'_, Email>> = emails.iter().map(Email::wire_form).collect();
        let request = self
            .client
            .new_json_request(http::Method::POST, EMAIL_BATCH_PATH, &payload)?;
        self.client.execute(request).await
    }
}
