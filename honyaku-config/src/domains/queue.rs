//! Queue directory configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};

/// Queue directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Queue directory; defaults to a well-known temp subfolder when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Safety-net scan interval of the worker loop (milliseconds)
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_scan_interval")]
    pub scan_interval: Duration,
}

impl QueueConfig {
    /// Resolve the effective queue directory
    pub fn effective_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("honyaku-queue"))
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            dir: None,
            scan_interval: default_scan_interval(),
        }
    }
}

impl Validatable for QueueConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.scan_interval.as_millis(),
            "scan_interval",
            self.domain_name(),
        )?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "queue"
    }
}

fn default_scan_interval() -> Duration {
    Duration::from_millis(500)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.scan_interval, Duration::from_millis(500));
        assert!(config.dir.is_none());
        assert!(config.effective_dir().ends_with("honyaku-queue"));
    }

    #[test]
    fn test_queue_config_validation() {
        let mut config = QueueConfig::default();
        assert!(config.validate().is_ok());

        config.scan_interval = Duration::from_millis(0);
        assert!(config.validate().is_err());
    }
}
