//! Translation engine boundary
//!
//! The actual translation provider is an external collaborator hidden
//! behind [`TranslationBackend`]. [`Translator`] is the explicit engine
//! handle the rest of the system holds: it owns the backend, applies the
//! Japanese-detection heuristic and measures durations. There is no
//! ambient global engine state.

pub mod detect;
pub mod error;
pub mod http;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use honyaku_ipc::Translation;

pub use error::{EngineError, EngineResult};
pub use http::LibreTranslateBackend;

/// Provider name reported when no translation was needed
pub const PASSTHROUGH_PROVIDER: &str = "passthrough";

/// A concrete translation provider.
///
/// Implementations translate Japanese text and report their availability;
/// input trimming and detection live in [`Translator`], so backends only
/// ever see text that genuinely needs translating.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Short provider name recorded in results
    fn provider(&self) -> &str;

    /// Whether the provider is currently reachable and ready
    async fn is_available(&self) -> bool;

    /// Translate the given text, returning the translated string
    async fn translate(&self, text: &str) -> EngineResult<String>;
}

/// Engine handle owned by whichever side is doing the translating.
///
/// Expensive backend construction happens once; the handle is then reused
/// for the owner's lifetime.
#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
}

impl Translator {
    /// Create a translator over the given backend
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Whether the underlying provider is ready to translate
    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    /// Translate text end to end.
    ///
    /// Input is trimmed first. Text with no Japanese characters is
    /// returned unchanged as a passthrough result without touching the
    /// backend.
    pub async fn translate(&self, text: &str) -> EngineResult<Translation> {
        let trimmed = text.trim();
        let started = Instant::now();

        if !detect::contains_japanese(trimmed) {
            return Ok(Translation {
                translated_text: trimmed.to_string(),
                original_text: trimmed.to_string(),
                was_japanese: false,
                provider: PASSTHROUGH_PROVIDER.to_string(),
                duration_ms: started.elapsed().as_millis() as i64,
            });
        }

        let translated = self.backend.translate(trimmed).await?;
        Ok(Translation {
            translated_text: translated,
            original_text: trimmed.to_string(),
            was_japanese: true,
            provider: self.backend.provider().to_string(),
            duration_ms: started.elapsed().as_millis() as i64,
        })
    }
}
