//! Validated configuration after merging CLI and TOML sources.
//!
//! All validation is performed during construction.

use std::fmt;
use std::path::Path;

use http::header::HeaderValue;
use url::Url;

use crate::transport::{ConnectionType, Credentials};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated connection settings ready for building a client.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Token and its connection type (required)
    pub credentials: Credentials,

    /// API endpoint
    pub base_url: Url,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ connection_type: {}, token: <redacted>, base_url: {}, user_agent: {} }}",
            self.credentials.connection_type(),
            self.base_url,
            self.user_agent,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token is missing or not a valid header value
    /// - The connection type in the file is unknown
    /// - The base URL is invalid
    /// - The user agent is not a valid header value
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let connection_type = Self::resolve_connection_type(cli, toml)?;
        let credentials = Self::resolve_credentials(cli, toml, connection_type)?;
        let base_url = Self::resolve_base_url(cli, toml)?;
        let user_agent = Self::resolve_user_agent(cli, toml)?;

        Ok(Self {
            credentials,
            base_url,
            user_agent,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_connection_type(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ConnectionType, ConfigError> {
        if let Some(arg) = cli.connection_type {
            return Ok(arg.into());
        }

        match toml.and_then(|t| t.api.connection_type.as_deref()) {
            Some(value) => Ok(value.parse::<ConnectionType>()?),
            None => Ok(defaults::CONNECTION_TYPE),
        }
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        connection_type: ConnectionType,
    ) -> Result<Credentials, ConfigError> {
        let token = cli
            .token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.token.as_deref()))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(field::TOKEN, "Use --token or set api.token in config file")
            })?;

        Credentials::new(connection_type, token).map_err(ConfigError::InvalidToken)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_user_agent(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let user_agent = cli
            .user_agent
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.user_agent.as_deref()))
            .unwrap_or(defaults::USER_AGENT);

        HeaderValue::from_str(user_agent)
            .map_err(|_| ConfigError::InvalidUserAgent(user_agent.to_string()))?;

        Ok(user_agent.to_string())
    }
}

/// Writes the default configuration template to the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
