//! Runtime configuration for the weather provider

use crate::state::{Units, DEFAULT_CITY};

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),
    #[error("default city must not be empty")]
    EmptyCity,
}

/// Settings shared by every provider request
#[derive(Clone, Debug)]
pub struct PanelConfig {
    pub base_url: String,
    /// Sent as `appid`; the provider rejects requests without one
    pub api_key: Option<String>,
    pub units: Units,
    pub timeout_secs: u64,
    pub default_city: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            units: Units::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_city: DEFAULT_CITY.to_string(),
        }
    }
}

impl PanelConfig {
    /// Prefer an explicit key, fall back to the environment.
    pub fn with_api_key(mut self, explicit: Option<String>) -> Self {
        self.api_key = explicit
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout(self.timeout_secs));
        }
        if self.default_city.trim().is_empty() {
            return Err(ConfigError::EmptyCity);
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PanelConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.default_city, "New Delhi");
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = PanelConfig::default().with_api_key(Some("abc123".into()));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = PanelConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let config = PanelConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout(0)));

        let config = PanelConfig {
            default_city: "  ".into(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyCity));
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = PanelConfig {
            base_url: "http://localhost:8080/".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://localhost:8080");
    }
}
