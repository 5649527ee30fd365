//! Bounce reporting.

use std::io::Write;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::page::paged_path;
use crate::Result;
use crate::client::{Client, Response};
use crate::transport::HttpClient;

const DELIVERY_STATS_PATH: &str = "deliverystats";
const BOUNCES_PATH: &str = "bounces";
const BOUNCE_TAGS_PATH: &str = "bounces/tags";

/// Bounce totals for the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeliveryStats {
    /// Addresses deactivated by hard bounces or spam complaints.
    pub inactive_mails: i64,
    /// One entry per bounce type, plus the "All" aggregate.
    pub bounces: Vec<BounceCount>,
}

/// Number of bounces of one type.
///
/// The aggregate entry named "All" has no `kind`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceCount {
    /// Bounce type such as "HardBounce"; absent on the "All" row.
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable label for the type.
    pub name: String,
    pub count: i64,
}

/// One page of bounces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Bounces {
    /// Matches across all pages.
    pub total_count: i64,
    /// Bounces on this page, at most the requested `count`.
    pub bounces: Vec<Bounce>,
}

/// A bounced message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bounce {
    /// Bounce id used by `get`, `dump` and `activate`.
    #[serde(rename = "ID")]
    pub id: i64,
    /// Bounce type, e.g. `HardBounce`.
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub type_code: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Id of the message that bounced, as returned by a send.
    #[serde(rename = "MessageID", default)]
    pub message_id: String,
    #[serde(rename = "ServerID", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Raw diagnostic from the receiving server.
    #[serde(default)]
    pub details: String,
    /// Address that bounced.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub bounced_at: DateTime<FixedOffset>,
    /// Whether [`BounceService::dump`] can return the raw SMTP source.
    #[serde(default)]
    pub dump_available: bool,
    /// Whether the recipient address is deactivated.
    #[serde(default)]
    pub inactive: bool,
    /// Whether [`BounceService::activate`] may reactivate the address.
    #[serde(default)]
    pub can_activate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Raw SMTP source of a bounced message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceDump {
    /// Full SMTP source; empty once the dump has expired.
    pub body: String,
}

/// Result of reactivating a bounced address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BounceActivation {
    #[serde(default)]
    pub message: String,
    /// The bounce after reactivation.
    pub bounce: Bounce,
}

/// Bounce endpoints (`deliverystats`, `bounces/...`).
#[derive(Debug)]
pub struct BounceService<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> BounceService<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> BounceService<'_, H> {
    /// Fetches bounce totals per type.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn delivery_stats(&self) -> Result<(DeliveryStats, Response)> {
        self.get_json(DELIVERY_STATS_PATH).await
    }

    /// Lists bounces, `count` at a time starting at `offset`.
    ///
    /// `filters` are passed through as extra query parameters, e.g.
    /// `[("type", "HardBounce"), ("fromdate", "2024-01-01")]`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PageSizeTooLarge`](crate::ValidationError::PageSizeTooLarge)
    /// without any network call when `count` exceeds
    /// [`MAX_PAGE_SIZE`](super::MAX_PAGE_SIZE), otherwise any
    /// [`Error`](crate::Error) from building, sending or decoding.
    pub async fn list(
        &self,
        count: u32,
        offset: u32,
        filters: &[(&str, &str)],
    ) -> Result<(Bounces, Response)> {
        let path = paged_path(BOUNCES_PATH, count, offset, filters)?;
        self.get_json(&path).await
    }

    /// Fetches a single bounce.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn get(&self, bounce_id: i64) -> Result<(Bounce, Response)> {
        self.get_json(&format!("{BOUNCES_PATH}/{bounce_id}")).await
    }

    /// Fetches the raw SMTP source of a bounce.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn dump(&self, bounce_id: i64) -> Result<(BounceDump, Response)> {
        self.get_json(&dump_path(bounce_id)).await
    }

    /// Copies the dump response body verbatim into `sink`.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building or sending, or
    /// [`Error::Io`](crate::Error::Io) if writing to `sink` fails.
    pub async fn write_dump<W: Write + ?Sized>(
        &self,
        bounce_id: i64,
        sink: &mut W,
    ) -> Result<Response> {
        let request = self
            .client
            .new_request(http::Method::GET, &dump_path(bounce_id))?;
        self.client.execute_to(request, sink).await
    }

    /// Reactivates the address a bounce deactivated.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn activate(&self, bounce_id: i64) -> Result<(BounceActivation, Response)> {
        let request = self.client.new_request(
            http::Method::PUT,
            &format!("{BOUNCES_PATH}/{bounce_id}/activate"),
        )?;
        self.client.execute(request).await
    }

    /// Lists the tags that have bounces.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from building, sending or decoding.
    pub async fn tags(&self) -> Result<(Vec<String>, Response)> {
        self.get_json(BOUNCE_TAGS_PATH).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<(T, Response)> {
        let request = self.client.new_request(http::Method::GET, path)?;
        self.client.execute(request).await
    }
}

fn dump_path(bounce_id: i64) -> String {
    format!("{BOUNCES_PATH}/{bounce_id}/dump")
}
