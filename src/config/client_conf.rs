use std::env;

use crate::config::ConfigError;

/// Configuration consumed by the client core: where the relay lives and
/// which property to scope data requests to.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend relay
    pub base_url: String,
    /// Property identifier used for property-data requests
    pub property_id: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("RELAY_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        let property_id = env::var("PROPERTY_ID")
            .map_err(|_| ConfigError::EnvVarNotFound("PROPERTY_ID".to_string()))?;

        let config = ClientConfig { base_url, property_id };
        config.validate()?;
        Ok(config)
    }

    pub fn new(base_url: impl Into<String>, property_id: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            property_id: property_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::ValidationError("Relay base URL must be http(s)".to_string()));
        }
        if self.property_id.is_empty() {
            return Err(ConfigError::ValidationError("Property id cannot be empty".to_string()));
        }
        Ok(())
    }
}
