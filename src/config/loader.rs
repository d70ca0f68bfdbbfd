use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, ProviderEndpoint};
use crate::settings::QuestionCount;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/vizquiz/config.toml` on Unix/macOS,
    /// or the platform equivalent via `dirs::config_dir()`.
    /// Falls back to the current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("vizquiz").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing default file is not an error and yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The bind address parses as a socket address
    /// - The default question count lies within the form bounds
    /// - Timeouts are non-zero
    /// - Every provider has a model and an http(s) base URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid bind address '{}'", self.server.bind_addr),
            });
        }

        let count = self.defaults.num_questions;
        if !(QuestionCount::MIN..=QuestionCount::MAX).contains(&count) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Default num_questions {} is outside {}..={}",
                    count,
                    QuestionCount::MIN,
                    QuestionCount::MAX
                ),
            });
        }

        if self.defaults.timeout_seconds == 0 || self.defaults.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        validate_endpoint("gemini", &self.providers.gemini)?;
        validate_endpoint("openrouter", &self.providers.openrouter)?;

        Ok(())
    }
}

fn validate_endpoint(name: &str, endpoint: &ProviderEndpoint) -> Result<(), ConfigError> {
    if endpoint.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: format!("Provider '{}' has an empty model", name),
        });
    }

    let url = endpoint.base_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            message: format!("Provider '{}' base_url '{}' must be http(s)", name, url),
        });
    }

    Ok(())
}
