//! Translation engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, validate_url, Validatable};

/// Translation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the translation endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional API key passed with each request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Source language code
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// Target language code
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// Per-request HTTP timeout (milliseconds)
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout: default_timeout(),
        }
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.endpoint, "endpoint", self.domain_name())?;
        validate_required_string(&self.source_lang, "source_lang", self.domain_name())?;
        validate_required_string(&self.target_lang, "target_lang", self.domain_name())?;
        validate_positive(self.timeout.as_millis(), "timeout", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "engine"
    }
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_source_lang() -> String {
    "ja".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}
