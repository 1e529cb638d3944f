//! Worker lifecycle configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};

/// Worker lifecycle configuration: spawn and response bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// How long to wait for a freshly spawned worker to become alive
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_spawn_timeout")]
    pub spawn_timeout: Duration,

    /// Liveness poll interval while waiting for startup
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_spawn_poll_interval"
    )]
    pub spawn_poll_interval: Duration,

    /// How long the dispatcher waits for a response file
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_response_timeout")]
    pub response_timeout: Duration,

    /// Response poll interval
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_response_poll_interval"
    )]
    pub response_poll_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            spawn_timeout: default_spawn_timeout(),
            spawn_poll_interval: default_spawn_poll_interval(),
            response_timeout: default_response_timeout(),
            response_poll_interval: default_response_poll_interval(),
        }
    }
}

impl Validatable for WorkerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.spawn_timeout.as_millis(),
            "spawn_timeout",
            self.domain_name(),
        )?;
        validate_positive(
            self.spawn_poll_interval.as_millis(),
            "spawn_poll_interval",
            self.domain_name(),
        )?;
        validate_positive(
            self.response_timeout.as_millis(),
            "response_timeout",
            self.domain_name(),
        )?;
        validate_positive(
            self.response_poll_interval.as_millis(),
            "response_poll_interval",
            self.domain_name(),
        )?;

        if self.spawn_poll_interval > self.spawn_timeout {
            return Err(self.validation_error("spawn_poll_interval exceeds spawn_timeout"));
        }
        if self.response_poll_interval > self.response_timeout {
            return Err(self.validation_error("response_poll_interval exceeds response_timeout"));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "worker"
    }
}

fn default_spawn_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_spawn_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_response_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_response_poll_interval() -> Duration {
    Duration::from_millis(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.spawn_timeout, Duration::from_secs(10));
        assert_eq!(config.spawn_poll_interval, Duration::from_millis(200));
        assert_eq!(config.response_timeout, Duration::from_secs(60));
        assert_eq!(config.response_poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_worker_config_validation() {
        let mut config = WorkerConfig::default();
        assert!(config.validate().is_ok());

        config.spawn_poll_interval = Duration::from_secs(20);
        assert!(config.validate().is_err());
    }
}
