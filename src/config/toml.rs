//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
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
    /// Bot bearer token
    pub token: Option<String>,

    /// API base URL
    pub base_url: Option<String>,

    /// Seconds without progress before a request is aborted
    pub timeout: Option<u64>,

    /// Maximum response body size in bytes (0 = unbounded)
    pub max_body_bytes: Option<usize>,

    /// Extra HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
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
    r#"# wire-bot configuration file

[api]
# Bot bearer token (required; --token or WIRE_BOT_TOKEN take precedence)
# token = "your-bot-token"

# API base URL (default: https://prod-nginz-https.wire.com)
# base_url = "https://prod-nginz-https.wire.com"

# Seconds the connection may stay silent before the request is aborted (default: 15)
timeout = 15

# Maximum response body size in bytes, 0 = unbounded (default: 0)
# max_body_bytes = 0

# Extra HTTP headers sent with every request
# [api.headers]
# X-Custom-Header = "value"
"#
    .to_string()
}
