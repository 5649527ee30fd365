//! Command execution.
//!
//! Builds the API client from validated configuration, runs one
//! subcommand against it and renders the result as pretty JSON.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use postmark::config::{Command, SendArgs, ValidatedConfig};
use postmark::transport::{AuthTransport, HttpClient, ReqwestClient};
use postmark::{Client, Email, EmailAttachment};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] postmark::Error),

    /// An input file (batch or attachment) could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadFile {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The batch file is not a JSON array of messages.
    #[error("Invalid batch file '{}': {source}", path.display())]
    BatchFile {
        /// Path of the batch file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Writing the result to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The result could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

/// Builds the authenticated client described by `config`.
pub fn build_client(config: &ValidatedConfig) -> Client {
    let transport = AuthTransport::new(ReqwestClient::new(), config.credentials.clone());

    Client::builder(transport)
        .backend_url(config.base_url.as_str())
        .user_agent(config.user_agent.as_str())
        .build()
}

/// Runs `command` and prints its result to stdout.
///
/// # Errors
///
/// Returns an error if the API call fails or the result cannot be written.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let client = build_client(&config);
    let mut stdout = io::stdout();
    dispatch(&client, command, &mut stdout).await
}

/// Runs `command` against `client`, writing the result to `out`.
async fn dispatch<H: HttpClient, W: Write>(
    client: &Client<H>,
    command: Command,
    out: &mut W,
) -> Result<(), RunError> {
    match command {
        Command::Send(args) => {
            let email = build_email(args)?;
            let (sent, _) = client.email().send(&email).await?;
            tracing::info!("Message {} submitted to {}", sent.message_id, sent.to);
            print_json(out, &sent)
        }
        Command::Batch { file } => {
            let emails = read_batch(&file)?;
            let (results, _) = client.email().send_batch(&emails).await?;
            log_batch_failures(&results);
            print_json(out, &results)
        }
        Command::DeliveryStats => {
            let (stats, _) = client.bounce().delivery_stats().await?;
            print_json(out, &stats)
        }
        Command::Bounces {
            count,
            offset,
            filters,
        } => {
            let filters: Vec<(&str, &str)> = filters
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            let (bounces, _) = client.bounce().list(count, offset, &filters).await?;
            print_json(out, &bounces)
        }
        Command::Bounce { id } => {
            let (bounce, _) = client.bounce().get(id).await?;
            print_json(out, &bounce)
        }
        Command::Dump { id } => {
            client.bounce().write_dump(id, out).await?;
            writeln!(out)?;
            Ok(())
        }
        Command::Activate { id } => {
            let (activation, _) = client.bounce().activate(id).await?;
            print_json(out, &activation)
        }
        Command::BounceTags => {
            let (tags, _) = client.bounce().tags().await?;
            print_json(out, &tags)
        }
        Command::Templates { count, offset } => {
            let (templates, _) = client.template().list(count, offset).await?;
            print_json(out, &templates)
        }
        Command::Template { id } => {
            let (template, _) = client.template().get(id).await?;
            print_json(out, &template)
        }
        // Needs no client; main handles it before configuration is loaded.
        Command::Init { .. } => Ok(()),
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(RunError::Render)?;
    writeln!(out)?;
    Ok(())
}

/// Assembles the message described by `postmark send` options.
fn build_email(args: SendArgs) -> Result<Email, RunError> {
    let mut email = Email::new(args.from, args.to).with_track_opens(args.track_opens);

    email.cc = args.cc;
    email.bcc = args.bcc;
    email.subject = args.subject;
    email.html_body = args.html_body;
    email.text_body = args.text_body;
    email.tag = args.tag;
    email.reply_to = args.reply_to;
    email.message_stream = args.message_stream;

    if let Some(template_id) = args.template_id {
        let model = args
            .template_model
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        email = email.with_template(template_id, model);
    }

    for (name, value) in args.headers {
        email = email.with_header(name, value);
    }
    for (key, value) in args.metadata {
        email = email.with_metadata(key, value);
    }
    for path in &args.attachments {
        email = email.with_attachment(read_attachment(path)?);
    }

    Ok(email)
}

fn read_attachment(path: &Path) -> Result<EmailAttachment, RunError> {
    let content = std::fs::read(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());

    Ok(EmailAttachment::new(name, &content))
}

fn read_batch(path: &Path) -> Result<Vec<Email>, RunError> {
    let content = std::fs::read(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&content).map_err(|source| RunError::BatchFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Batch sends succeed as a whole even when single messages are rejected.
fn log_batch_failures(results: &[postmark::EmailResponse]) {
    for (index, result) in results.iter().enumerate() {
        if result.error_code != 0 {
            tracing::warn!(
                "Message {index} to {to} rejected: {code} {message}",
                to = result.to,
                code = result.error_code,
                message = result.message,
            );
        }
    }
}
