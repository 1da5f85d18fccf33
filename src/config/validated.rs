//! Validated configuration built from a TOML source.
//!
//! All validation is performed during construction; a [`ValidatedConfig`]
//! can always be turned into a working engine.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use url::Url;

use crate::webhook::{DeliveryEngine, RequestOptions, RetryOverrides, RetryPolicy};

use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{RetrySection, TomlConfig};

/// Fully validated configuration ready for use by the application.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL (required)
    pub url: Url,

    /// Headers sent with every request
    pub headers: HeaderMap,

    /// Per-attempt timeout, if any
    pub timeout: Option<Duration>,

    /// Retry policy, defaults merged with the `[retry]` section
    pub retry_policy: RetryPolicy,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeout_str = self
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}ms", t.as_millis()));

        write!(
            f,
            "Config {{ url: {}, headers: {}, timeout: {}, retry: {}x/{}ms..{}ms }}",
            self.url,
            self.headers.len(),
            timeout_str,
            self.retry_policy.max_retries,
            self.retry_policy.base_delay.as_millis(),
            self.retry_policy.max_delay.as_millis(),
        )
    }
}

impl ValidatedConfig {
    /// Validates a parsed TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `webhook.url` is missing or invalid
    /// - A header name or value is invalid
    /// - `webhook.timeout_ms` or `retry.base_delay_ms` is zero
    /// - `retry.max_delay_ms` is below the effective base delay
    pub fn from_toml(toml: &TomlConfig) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(toml)?;
        let headers = Self::resolve_headers(toml)?;
        let timeout = Self::resolve_timeout(toml)?;
        let retry_policy = Self::build_retry_policy(&toml.retry)?;

        Ok(Self {
            url,
            headers,
            timeout,
            retry_policy,
        })
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = TomlConfig::load(path)?;
        Self::from_toml(&toml)
    }

    /// Creates an engine targeting the configured URL with the configured
    /// headers and retry policy.
    #[must_use]
    pub fn build_engine<H>(&self, client: H) -> DeliveryEngine<H> {
        DeliveryEngine::new(client, self.url.clone())
            .with_headers(self.headers.clone())
            .with_retry_policy(self.retry_policy.clone())
    }

    /// Returns per-call options carrying the configured timeout.
    #[must_use]
    pub fn request_options(&self) -> RequestOptions {
        match self.timeout {
            Some(timeout) => RequestOptions::new().with_timeout(timeout),
            None => RequestOptions::new(),
        }
    }

    fn resolve_url(toml: &TomlConfig) -> Result<Url, ConfigError> {
        let url_str = toml
            .webhook
            .url
            .as_deref()
            .ok_or_else(|| ConfigError::missing(field::URL, "Set webhook.url in config file"))?;

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_headers(toml: &TomlConfig) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        for (name, value) in &toml.webhook.headers {
            let header_name = parse_header_name(name)?;
            let header_value = parse_header_value(name, value)?;
            headers.insert(header_name, header_value);
        }

        if let Some(token) = toml.webhook.bearer.as_deref() {
            let auth_value = format!("Bearer {token}");
            let header_value = parse_header_value("Authorization", &auth_value)?;
            headers.insert(AUTHORIZATION, header_value);
        }

        Ok(headers)
    }

    fn resolve_timeout(toml: &TomlConfig) -> Result<Option<Duration>, ConfigError> {
        match toml.webhook.timeout_ms {
            Some(0) => Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            }),
            Some(ms) => Ok(Some(Duration::from_millis(ms))),
            None => Ok(None),
        }
    }

    fn build_retry_policy(retry: &RetrySection) -> Result<RetryPolicy, ConfigError> {
        let base_delay_ms = retry
            .base_delay_ms
            .unwrap_or(defaults::RETRY_BASE_DELAY_MS);

        let max_delay_ms = retry.max_delay_ms.unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        if base_delay_ms == 0 {
            return Err(ConfigError::InvalidRetry(
                "base_delay_ms must be greater than 0".to_string(),
            ));
        }

        if max_delay_ms < base_delay_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay_ms ({max_delay_ms}) must be >= base_delay_ms ({base_delay_ms})"
            )));
        }

        let overrides = RetryOverrides {
            max_retries: retry.max_retries,
            base_delay: retry.base_delay_ms.map(Duration::from_millis),
            max_delay: retry.max_delay_ms.map(Duration::from_millis),
        };

        Ok(RetryPolicy::default().merged(&overrides))
    }
}

/// Writes the default configuration template to a file.
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

// Helper functions

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
