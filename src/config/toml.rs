//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional; validation happens in
/// [`ValidatedConfig`](super::ValidatedConfig).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of retries after the first attempt
    pub max_retries: Option<u32>,

    /// Backoff base delay in milliseconds
    pub base_delay_ms: Option<u64>,

    /// Backoff cap in milliseconds
    pub max_delay_ms: Option<u64>,
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
    r#"# Webhook delivery configuration

[webhook]
# Webhook URL (required)
# url = "https://hooks.example.com/api/webhooks/123/token"

# Abort each attempt after this many milliseconds (default: no timeout)
# timeout_ms = 10000

# HTTP headers sent with every request
# [webhook.headers]
# User-Agent = "my-service/1.0"

# Bearer token for Authorization header
# bearer = "your-token-here"

[retry]
# Retries after the first attempt; 0 disables retries (default: 3)
# max_retries = 3

# Backoff base delay in milliseconds (default: 1000)
# base_delay_ms = 1000

# Backoff cap in milliseconds, must be >= base_delay_ms (default: 60000)
# max_delay_ms = 60000
"#
    .to_string()
}
