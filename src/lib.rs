//! Postmark API client
//!
//! An async client for the Postmark transactional email API: send single,
//! batch and templated email, inspect bounces and fetch templates.
//!
//! # Layers
//!
//! - [`transport`]: the HTTP executor trait, a reqwest implementation and
//!   the credential-injecting [`AuthTransport`](transport::AuthTransport)
//! - [`client`]: configuration and the build/execute/decode pipeline
//! - [`api`]: the email, bounce and template services
//! - [`config`]: layered configuration for the `postmark` command-line tool
//!
//! Every service method performs exactly one HTTP round trip. Nothing is
//! retried, and errors are returned to the caller rather than logged.
//!
//! # Example
//!
//! ```no_run
//! use postmark::{Client, transport::ConnectionType};
//!
//! # async fn example() -> Result<(), postmark::Error> {
//! let client = Client::with_token(ConnectionType::Server, "server-token")?;
//!
//! let (stats, _) = client.bounce().delivery_stats().await?;
//! println!("inactive: {}", stats.inactive_mails);
//!
//! let (page, _) = client.bounce().list(50, 0, &[("type", "HardBounce")]).await?;
//! println!("{} hard bounces", page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
mod error;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use api::{
    Bounce, BounceActivation, BounceCount, BounceDump, Bounces, DeliveryStats, Email,
    EmailAttachment, EmailHeader, EmailResponse, MAX_PAGE_SIZE, Template, TemplateSummary,
    Templates,
};
pub use client::{Client, ClientBuilder, Response};
pub use error::{ApiError, Error, ValidationError};

/// Result type alias for Postmark operations.
pub type Result<T> = std::result::Result<T, Error>;
