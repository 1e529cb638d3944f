//! Configuration loading and environment variable handling

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domains::HonyakuConfig;
use crate::error::{ConfigError, ConfigResult};

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with the default prefix
    pub fn new() -> Self {
        Self {
            prefix: "HONYAKU".to_string(),
        }
    }

    /// Create a new config loader with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<HonyakuConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: HonyakuConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<HonyakuConfig> {
        let mut config = HonyakuConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<HonyakuConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut HonyakuConfig) -> ConfigResult<()> {
        if let Ok(dir) = self.get_env_var("QUEUE_DIR") {
            config.queue.dir = Some(dir.into());
        }

        if let Ok(timeout) = self.get_env_var("RESPONSE_TIMEOUT_SECONDS") {
            let seconds: u64 = timeout.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid RESPONSE_TIMEOUT_SECONDS: {}", e))
            })?;
            config.worker.response_timeout = Duration::from_secs(seconds);
        }

        if let Ok(endpoint) = self.get_env_var("ENGINE_URL") {
            config.engine.endpoint = endpoint;
        }

        if let Ok(api_key) = self.get_env_var("ENGINE_API_KEY") {
            config.engine.api_key = Some(api_key);
        }

        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.logging.level = crate::domains::logging::LogLevel::from_str(&level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", level)))?;
        }

        Ok(())
    }

    /// Get an environment variable with the configured prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
