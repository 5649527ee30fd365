//! Resource services of the Postmark API.
//!
//! Each service is a borrowed handle on a [`Client`](crate::Client) that
//! assembles a path and payload, then delegates to the client pipeline:
//! - [`EmailService`]: single, batch and template sends
//! - [`BounceService`]: delivery stats, bounce listing, dumps, reactivation, tags
//! - [`TemplateService`]: template listing and lookup

mod bounce;
mod email;
mod page;
mod template;

#[cfg(test)]
mod email_tests;

pub use bounce::{
    Bounce, BounceActivation, BounceCount, BounceDump, BounceService, Bounces, DeliveryStats,
};
pub use email::{Email, EmailAttachment, EmailHeader, EmailResponse, EmailService};
pub use page::MAX_PAGE_SIZE;
pub use template::{Template, TemplateService, TemplateSummary, Templates};
