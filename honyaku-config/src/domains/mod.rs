//! Domain-specific configuration modules

pub mod engine;
pub mod logging;
pub mod queue;
pub mod utils;
pub mod worker;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Main Honyaku configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HonyakuConfig {
    /// Queue directory configuration
    #[serde(default)]
    pub queue: queue::QueueConfig,

    /// Worker lifecycle configuration
    #[serde(default)]
    pub worker: worker::WorkerConfig,

    /// Translation engine configuration
    #[serde(default)]
    pub engine: engine::EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl HonyakuConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.queue.validate()?;
        self.worker.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = HonyakuConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
