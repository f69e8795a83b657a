//! Configuration loading for the customer UI.
//!
//! Only `api_base_url` is required. The endpoint path defaults to the API's
//! customer base path and the request timeout to the HTTP client's own.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_customer_endpoint() -> String {
    customer_api::CUSTOMER_BASE_PATH.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub api_base_url: String,
    #[serde(default = "default_customer_endpoint")]
    pub customer_endpoint: String,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or CUSTOMER_UI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl UiConfig {
    /// Config pointing at `api_base_url` with every optional key defaulted.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            customer_endpoint: default_customer_endpoint(),
            request_timeout_ms: None,
        }
    }

    /// Load and validate the file at `path`.
    ///
    /// The CLI fills `path` from `--config` or `CUSTOMER_UI_CONFIG`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: UiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if !self.customer_endpoint.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "customer_endpoint",
                reason: "must start with '/'".to_string(),
            });
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute URL of the customer collection.
    pub fn customer_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim().trim_end_matches('/'),
            self.customer_endpoint.trim_end_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
