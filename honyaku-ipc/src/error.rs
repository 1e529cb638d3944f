//! IPC error types

use thiserror::Error;

/// IPC result type
pub type IpcResult<T> = Result<T, IpcError>;

/// IPC error types
#[derive(Debug, Error)]
pub enum IpcError {
    /// IO error touching the queue directory
    #[error("IO error: {0}")]
    IoError(String),

    /// Request file was unparsable or missing required fields
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Response file was unparsable or missing required fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Serialization error writing a queue file
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl IpcError {
    /// Check if this error is retryable by waiting and rescanning
    pub fn is_retryable(&self) -> bool {
        matches!(self, IpcError::IoError(_))
    }
}

impl From<std::io::Error> for IpcError {
    fn from(err: std::io::Error) -> Self {
        IpcError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(IpcError::IoError("disk full".to_string()).is_retryable());
        assert!(!IpcError::MalformedRequest("missing id".to_string()).is_retryable());
        assert!(!IpcError::MalformedResponse("bad json".to_string()).is_retryable());
    }
}
