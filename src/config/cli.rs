//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with global connection options and
//! one subcommand per API operation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::defaults;
use crate::transport::ConnectionType;

/// Postmark command-line client
///
/// Sends email, inspects bounces and fetches templates through the
/// Postmark HTTP API.
#[derive(Debug, Parser)]
#[command(name = "postmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Token scope
    #[arg(long = "connection-type", value_enum, global = true)]
    pub connection_type: Option<ConnectionTypeArg>,

    /// API endpoint
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// User-Agent header value
    #[arg(long = "user-agent", global = true)]
    pub user_agent: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for postmark
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single email
    Send(SendArgs),

    /// Send a batch of emails read from a JSON array file
    Batch {
        /// JSON file holding an array of messages
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Show bounce totals per type
    DeliveryStats,

    /// List bounces
    Bounces {
        /// Number of bounces to return
        #[arg(long, default_value_t = defaults::BOUNCE_PAGE_SIZE)]
        count: u32,

        /// Number of bounces to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Extra query filter, e.g. type=HardBounce (can be specified multiple times)
        #[arg(long = "filter", value_name = "K=V", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },

    /// Show a single bounce
    Bounce {
        /// Bounce id
        id: i64,
    },

    /// Print the bounce dump response (JSON with the raw SMTP source) as received
    Dump {
        /// Bounce id
        id: i64,
    },

    /// Reactivate the address deactivated by a bounce
    Activate {
        /// Bounce id
        id: i64,
    },

    /// List tags that have bounces
    BounceTags,

    /// List templates
    Templates {
        /// Number of templates to return
        #[arg(long, default_value_t = defaults::TEMPLATE_PAGE_SIZE)]
        count: u32,

        /// Number of templates to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show a single template
    Template {
        /// Template id
        id: i64,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Options of `postmark send`.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Sender address
    #[arg(long)]
    pub from: String,

    /// Recipient address(es), comma-separated
    #[arg(long)]
    pub to: String,

    /// Carbon-copy address(es), comma-separated
    #[arg(long)]
    pub cc: Option<String>,

    /// Blind carbon-copy address(es), comma-separated
    #[arg(long)]
    pub bcc: Option<String>,

    /// Message subject
    #[arg(long)]
    pub subject: Option<String>,

    /// HTML body
    #[arg(long = "html-body")]
    pub html_body: Option<String>,

    /// Plain-text body
    #[arg(long = "text-body")]
    pub text_body: Option<String>,

    /// Tag for grouping messages in statistics
    #[arg(long)]
    pub tag: Option<String>,

    /// Reply-To address
    #[arg(long = "reply-to")]
    pub reply_to: Option<String>,

    /// Render server template with this id
    #[arg(long = "template-id")]
    pub template_id: Option<i64>,

    /// Template model as a JSON object
    #[arg(long = "template-model", value_parser = parse_json, requires = "template_id")]
    pub template_model: Option<serde_json::Value>,

    /// Enable open tracking
    #[arg(long = "track-opens")]
    pub track_opens: bool,

    /// Message stream id (default: outbound)
    #[arg(long = "message-stream")]
    pub message_stream: Option<String>,

    /// Custom message header (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", value_parser = parse_key_value)]
    pub headers: Vec<(String, String)>,

    /// Metadata entry (can be specified multiple times)
    #[arg(long = "metadata", value_name = "K=V", value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,

    /// File to attach (can be specified multiple times)
    #[arg(long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,
}

/// Connection type argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionTypeArg {
    /// Server-scoped token
    Server,
    /// Account-scoped token
    Account,
}

impl From<ConnectionTypeArg> for ConnectionType {
    fn from(arg: ConnectionTypeArg) -> Self {
        match arg {
            ConnectionTypeArg::Server => Self::Server,
            ConnectionTypeArg::Account => Self::Account,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

/// Splits `key=value`; the value may itself contain `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected K=V, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| e.to_string())
}
