//! TOML configuration file parsing.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a file can hold only the values the
/// CLI does not supply.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API connection section
    #[serde(default)]
    pub api: ApiSection,
}

/// API connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Server or account API token
    pub token: Option<String>,

    /// "server" or "account"
    pub connection_type: Option<String>,

    /// API endpoint
    pub base_url: Option<String>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Postmark CLI Configuration File
# Pass it with: postmark --config postmark.toml <command>

[api]
# API token (required unless given with --token)
# token = "your-server-token"

# Token scope: "server" or "account" (default: server)
# connection_type = "server"

# API endpoint (default: https://api.postmarkapp.com/)
# base_url = "https://api.postmarkapp.com/"

# User-Agent header sent with every request
# user_agent = "postmark-rs"
"#
    .to_string()
}
