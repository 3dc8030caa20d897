//! Configuration management for the RAX FTP client
//!
//! Values load from `config.toml` with `RAX_FTP_CLIENT_*` environment
//! overrides. A missing file is fine; compiled defaults apply.

use config::{Config, Environment, File};
use log::warn;
use serde::Deserialize;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Control connection port used when `open` names none
    pub default_port: u16,

    /// Connection attempts per channel before giving up
    pub connect_retries: u32,

    /// Chunk size for data channel streaming
    pub transfer_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: 21,
            connect_retries: 10,
            transfer_buffer_size: 8192,
        }
    }
}

impl ClientConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        if !std::path::Path::new("config.toml").exists() {
            warn!("config.toml not found, using default configuration");
        }

        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("RAX_FTP_CLIENT"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.default_port == 0 {
            return Err(config::ConfigError::Message(
                "default_port cannot be 0".into(),
            ));
        }

        if self.connect_retries == 0 {
            return Err(config::ConfigError::Message(
                "connect_retries must be greater than 0".into(),
            ));
        }

        if self.transfer_buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "transfer_buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.default_port, 21);
        assert_eq!(config.connect_retries, 10);
        assert_eq!(config.transfer_buffer_size, 8192);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ClientConfig {
            default_port: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let config = ClientConfig {
            transfer_buffer_size: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
