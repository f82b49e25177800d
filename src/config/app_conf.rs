use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Bind address for the relay server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading app configuration from environment variables");

        let host = env::var("APP_HOST").unwrap_or_else(|_| {
            warn!("APP_HOST not set, defaulting to 127.0.0.1");
            "127.0.0.1".to_string()
        });
        debug!("App host: {}", host);

        let port = Self::parse_port(env::var("APP_PORT").ok())?;
        debug!("App port: {}", port);

        let config = AppConfig { host, port };
        config.validate()?;
        info!("App configuration loaded successfully");
        Ok(config)
    }

    /// A missing APP_PORT falls back to 8080; a malformed one is a
    /// configuration error, not a silent default.
    fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
        match raw {
            None => {
                warn!("APP_PORT not set, defaulting to 8080");
                Ok(8080)
            }
            Some(value) => value.parse::<u16>().map_err(|_| {
                error!("Invalid APP_PORT value: {}", value);
                ConfigError::InvalidValue(format!("Invalid APP_PORT value: {}", value))
            }),
        }
    }

    pub fn from_test_env() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("App host cannot be empty".to_string()));
        }

        if self.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "App host is not a valid IP address: {}",
                self.host
            )));
        }

        if self.port == 0 {
            return Err(ConfigError::ValidationError("App port cannot be 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_is_valid() {
        let config = AppConfig::from_test_env();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_port_defaults() {
        assert_eq!(AppConfig::parse_port(None).unwrap(), 8080);
    }

    #[test]
    fn test_malformed_port_is_rejected() {
        let err = AppConfig::parse_port(Some("eighty".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        assert!(AppConfig::parse_port(Some("70000".to_string())).is_err());
    }

    #[test]
    fn test_validate_rejects_hostname() {
        let mut config = AppConfig::from_test_env();
        config.host = "not an ip".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = AppConfig::from_test_env();
        config.port = 0;
        assert!(config.validate().is_err());
    }
}
