//! Client configuration

use crate::types::DEFAULT_BASE_URL;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the merchant API key
pub const ENV_API_KEY: &str = "PAYCARD_API_KEY";
/// Environment variable overriding the gateway host
pub const ENV_BASE_URL: &str = "PAYCARD_BASE_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "PAYCARD_TIMEOUT_SECS";

/// Errors raised while assembling a [`PaycardConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{name} environment variable is required")]
    Missing { name: &'static str },

    /// A variable is set but unusable
    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Settings used to build a [`crate::PaycardClient`]
#[derive(Clone, PartialEq, Eq)]
pub struct PaycardConfig {
    /// Merchant API key issued by Paycard
    pub api_key: String,
    /// Gateway host
    pub base_url: String,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for PaycardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaycardConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PaycardConfig {
    /// Create a config for the production host
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set the gateway host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing { name: ENV_API_KEY })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_TIMEOUT_SECS,
                message: format!("expected a whole number of seconds, got '{}'", raw),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid {
                name: ENV_BASE_URL,
                message: "base URL cannot be empty".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: ENV_BASE_URL,
                message: "base URL must start with http:// or https://".to_string(),
            });
        }

        Ok(())
    }
}
