//! Client configuration model.

use crate::error::{JobdeskError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL used when neither the environment nor config.toml sets one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the API base URL.
pub const API_BASE_URL_ENV: &str = "JOBDESK_API_BASE_URL";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Replaces the base URL. Call [`ClientConfig::validated`] afterwards.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Normalises and checks the configuration.
    ///
    /// Trailing `/` is trimmed from the base URL so endpoint paths can be
    /// appended directly.
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(JobdeskError::config("api_base_url must not be empty"));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(JobdeskError::config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                trimmed
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(JobdeskError::config(
                "request_timeout_secs must be greater than zero",
            ));
        }
        self.api_base_url = trimmed;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validated_trims_trailing_slash() {
        let config = ClientConfig::default()
            .with_api_base_url("https://api.example.com/v1/")
            .validated()
            .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_validated_rejects_empty_and_non_http() {
        let empty = ClientConfig::default().with_api_base_url("  ").validated();
        assert!(matches!(empty, Err(JobdeskError::Config(_))));

        let ftp = ClientConfig::default()
            .with_api_base_url("ftp://example.com")
            .validated();
        assert!(matches!(ftp, Err(JobdeskError::Config(_))));
    }

    #[test]
    fn test_validated_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(&err, JobdeskError::Config(m) if m.contains("request_timeout_secs")));
    }
}
