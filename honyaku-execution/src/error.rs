//! Error types for worker coordination and execution

use thiserror::Error;

/// Execution result type
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Worker-path and execution errors.
///
/// Everything except `WorkerNotRunning` is recovered by the fallback
/// executor before a user ever sees it.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Worker never became alive within the spawn bound
    #[error("Worker did not become alive within {0} seconds")]
    WorkerSpawnTimeout(u64),

    /// No response file appeared within the response bound
    #[error("No worker response within {0} seconds")]
    WorkerResponseTimeout(u64),

    /// Response file existed but was unusable
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Worker answered with ok = false
    #[error("Worker reported failure: {0}")]
    WorkerFailure(String),

    /// Shutdown requested while no worker is running (a usage mistake,
    /// reported rather than masked)
    #[error("Worker is not running")]
    WorkerNotRunning,

    /// Failed to spawn the worker process
    #[error("Failed to spawn worker: {0}")]
    SpawnError(String),

    /// Failed to subscribe to queue directory changes
    #[error("Queue watch error: {0}")]
    WatchError(String),

    /// Engine error from the fallback path
    #[error("Engine error: {0}")]
    EngineError(#[from] honyaku_engine::EngineError),

    /// Queue IPC error
    #[error("IPC error: {0}")]
    IpcError(#[from] honyaku_ipc::IpcError),
}
