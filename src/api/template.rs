//! Template retrieval.

use serde::{Deserialize, Serialize};

use super::page::paged_path;
use crate::Result;
use crate::client::{Client, Response};
use crate::transport::HttpClient;

const TEMPLATES_PATH: &str = "templates";

/// One page of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Templates {
    /// Templates across all pages.
    pub total_count: i64,
    pub templates: Vec<TemplateSummary>,
}

/// Identifying information about a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateSummary {
    /// Id accepted by `Email::with_template` and `TemplateService::get`.
    pub template_id: i64,
    pub name: String,
    /// Inactive templates cannot be sent.
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A template with its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Template {
    pub template_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Subject template, with `{{placeholders}}`.
    pub subject: Option<String>,
    pub html_body: Option<String>,
    pub text_body: Option<String>,
    /// Server the template belongs to.
    pub associated_server_id: i64,
    pub active: bool,
}

/// Template endpoints (`templates/...`).
#[derive(Debug)]
pub struct TemplateService<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> TemplateService<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> TemplateService<'_, H> {
    /// Lists templates, `count` at a time starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PageSizeTooLarge`](crate::ValidationError::PageSizeTooLarge)
    /// without any network call when `count` exceeds
    /// [`MAX_PAGE_SIZE`](super::MAX_PAGE_SIZE), otherwise any
    /// [`Error`](crate::Error) from building, sending or decoding.
    pub async fn list(&self, count: u32, offset: u32) -> Result<(Templates, Response)> {
        let path = paged_path(TEMPLATES_PATH, count, offset, &[])?;
        let request = self.client.new_request(http::Method::GET, &path)?;
        self.client.execute(request).await
    }

    /// Fetches one template by id.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn get(&self, template_id: i64) -> Result<(Template, Response)> {
        let request = self
            .client
            .new_request(http::Method::GET, &format!("{TEMPLATES_PATH}/{template_id}"))?;
        self.client.execute(request).await
    }
}
