//! Local synchronous fallback execution
//!
//! Invokes the translation engine directly, in-process, bypassing the
//! queue entirely. Used when the worker path fails or when the caller
//! asked for verbose/synchronous behavior.

use std::sync::Arc;

use tracing::debug;

use honyaku_engine::{detect, EngineError, TranslationBackend, Translator};
use honyaku_ipc::Translation;

use crate::error::ExecutionResult;

/// In-process executor over an engine handle of its own
pub struct FallbackExecutor {
    translator: Translator,
}

impl FallbackExecutor {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            translator: Translator::new(backend),
        }
    }

    /// Translate locally.
    ///
    /// The availability probe only runs when the engine will actually be
    /// invoked; passthrough input must succeed even with the provider
    /// down.
    pub async fn execute(&self, text: &str) -> ExecutionResult<Translation> {
        if detect::contains_japanese(text.trim()) && !self.translator.is_available().await {
            return Err(EngineError::Unavailable.into());
        }
        debug!("executing translation locally");
        Ok(self.translator.translate(text).await?)
    }
}
