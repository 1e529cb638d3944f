//! Domain-driven configuration management for Honyaku
//!
//! Configuration is split by functional domain, with defaults, validation
//! and environment variable overrides under the `HONYAKU_` prefix.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    engine::EngineConfig, logging::debug_enabled, logging::LogLevel, logging::LoggingConfig,
    queue::QueueConfig, worker::WorkerConfig, HonyakuConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
