use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Configuration for the upstream hospitality API.
///
/// The API token stays server-side; the relay never forwards it to
/// the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitableConfig {
    /// Base URL of the upstream API
    pub base_url: String,
    /// Bearer token for the upstream API
    pub api_token: String,
    /// Identifier of the single property this site markets
    pub property_id: String,
}

impl HospitableConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Hospitable configuration from environment variables");

        let base_url = env::var("HOSPITABLE_BASE_URL").unwrap_or_else(|_| {
            warn!("HOSPITABLE_BASE_URL not set, using public API default");
            "https://public.api.hospitable.com/v2".to_string()
        });
        debug!("Hospitable base URL: {}", base_url);

        let api_token = env::var("HOSPITABLE_API_TOKEN").map_err(|_| {
            error!("HOSPITABLE_API_TOKEN environment variable not found");
            ConfigError::EnvVarNotFound("HOSPITABLE_API_TOKEN".to_string())
        })?;
        debug!("Hospitable API token: [REDACTED]");

        let property_id = env::var("HOSPITABLE_PROPERTY_ID").map_err(|_| {
            error!("HOSPITABLE_PROPERTY_ID environment variable not found");
            ConfigError::EnvVarNotFound("HOSPITABLE_PROPERTY_ID".to_string())
        })?;
        debug!("Property id: {}", property_id);

        let config = HospitableConfig {
            base_url,
            api_token,
            property_id,
        };

        config.validate()?;
        info!("Hospitable configuration loaded successfully");
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        HospitableConfig {
            base_url: "http://localhost:9999".to_string(),
            api_token: "test-token".to_string(),
            property_id: "test-property".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError("Hospitable base URL cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http") {
            return Err(ConfigError::ValidationError("Hospitable base URL must be http(s)".to_string()));
        }

        if self.api_token.is_empty() {
            return Err(ConfigError::ValidationError("Hospitable API token cannot be empty".to_string()));
        }

        if self.property_id.is_empty() {
            return Err(ConfigError::ValidationError("Property id cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_is_valid() {
        let config = HospitableConfig::from_test_env();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_token() {
        let mut config = HospitableConfig::from_test_env();
        config.api_token = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = HospitableConfig::from_test_env();
        config.base_url = "localhost:9999".to_string();
        assert!(config.validate().is_err());
    }
}
