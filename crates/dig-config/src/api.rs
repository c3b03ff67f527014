//! Backend API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://discoveries.example.org`. Endpoint paths
    /// (`/api/...`) are appended by the client.
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// The configured origin, or an error naming the settings that provide it.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".into(),
                hint: "DIGMAP_API__URL, NEXT_PUBLIC_API_URL, or [api] url".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(self.url.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 10);
        assert!(matches!(
            config.require_url(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn whitespace_url_is_not_configured() {
        let config = ApiConfig {
            url: "  ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn require_url_trims() {
        let config = ApiConfig {
            url: " http://localhost:8080 ".into(),
            ..Default::default()
        };
        assert_eq!(config.require_url().unwrap(), "http://localhost:8080");
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = ApiConfig {
            url: "http://localhost:8080".into(),
            timeout_secs: 0,
        };
        assert!(matches!(
            config.require_url(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
