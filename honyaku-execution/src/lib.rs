//! Worker lifecycle, queue dispatch and fallback execution
//!
//! The dispatcher side of a short-lived CLI process and the long-lived
//! worker daemon both live here. They coordinate exclusively through the
//! file queue in `honyaku-ipc`: the dispatcher ensures a worker exists,
//! enqueues a request and polls for the matching response; the worker
//! drains the queue with a single warmed-up translation engine. Any
//! failure on the queued path falls back to local synchronous execution.

pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod liveness;
pub mod os;
pub mod service;
pub mod worker;

use std::sync::Arc;

use honyaku_engine::TranslationBackend;

pub use dispatcher::{DetachedProcessLauncher, Dispatcher, WorkerLauncher};
pub use error::{ExecutionError, ExecutionResult};
pub use fallback::FallbackExecutor;
pub use liveness::{LivenessMonitor, WorkerLiveness};
pub use service::TranslationService;
pub use worker::WorkerDaemon;

/// Deferred construction of the translation backend.
///
/// The engine is expensive to set up, so both the worker daemon and the
/// fallback path build it only when a request actually needs it.
pub type BackendFactory = Box<dyn Fn() -> Arc<dyn TranslationBackend> + Send + Sync>;
