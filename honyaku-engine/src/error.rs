//! Engine error types

use thiserror::Error;

/// Engine result type
pub type EngineResult<T> = Result<T, EngineError>;

/// Translation engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// The provider reported it is not ready to translate
    #[error("Translation engine is not available")]
    Unavailable,

    /// HTTP transport failure talking to the provider
    #[error("Engine HTTP error: {0}")]
    HttpError(String),

    /// The provider answered with something we could not interpret
    #[error("Engine protocol error: {0}")]
    ProtocolError(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::HttpError(err.to_string())
    }
}
