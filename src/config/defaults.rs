//! Default values for configuration options.

use crate::transport::ConnectionType;

/// Default connection type when neither CLI nor file names one.
pub const CONNECTION_TYPE: ConnectionType = ConnectionType::Server;

/// Default API endpoint.
pub const BASE_URL: &str = crate::client::DEFAULT_BACKEND_URL;

/// Default `User-Agent` header.
pub const USER_AGENT: &str = crate::client::DEFAULT_USER_AGENT;

/// Default bounce page size for `postmark bounces`.
pub const BOUNCE_PAGE_SIZE: u32 = 50;

/// Default template page size for `postmark templates`.
pub const TEMPLATE_PAGE_SIZE: u32 = 100;

/// File written by `postmark init` when no output path is given.
pub const CONFIG_FILE: &str = "postmark.toml";
