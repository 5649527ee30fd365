//! Configuration layer for the `postmark` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Connection settings are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - global options such as `--token`
//! 2. **TOML config file** - the `[api]` section of the file given by `--config`
//! 3. **Built-in defaults** - production endpoint, server connection type
//!
//! The API token has no default and must come from the CLI or the file.
//!
//! Paging and message options are CLI-only; they belong to a single
//! invocation rather than to the connection.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command, ConnectionTypeArg, SendArgs};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
