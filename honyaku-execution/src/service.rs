//! Top-level translation path and fallback policy
//!
//! The service owns the decision between the queued worker path and
//! local execution. Worker-path failures of any kind are recovered by
//! silently retrying the same text locally, so the user gets a result
//! whenever the engine itself is reachable; only a fallback failure
//! surfaces.

use std::sync::OnceLock;

use tracing::debug;

use honyaku_ipc::{QueueRequest, Translation};

use crate::dispatcher::Dispatcher;
use crate::error::{ExecutionError, ExecutionResult};
use crate::fallback::FallbackExecutor;
use crate::BackendFactory;

/// Front-end façade over dispatcher and fallback
pub struct TranslationService {
    dispatcher: Dispatcher,
    backend_factory: BackendFactory,
    fallback: OnceLock<FallbackExecutor>,
}

impl TranslationService {
    pub fn new(dispatcher: Dispatcher, backend_factory: BackendFactory) -> Self {
        Self {
            dispatcher,
            backend_factory,
            fallback: OnceLock::new(),
        }
    }

    /// Translate text, preferring the warm worker.
    ///
    /// Verbose mode bypasses the queue so engine diagnostics land on the
    /// caller's stderr instead of vanishing into the background process.
    pub async fn translate(&self, text: &str, verbose: bool) -> ExecutionResult<Translation> {
        if verbose {
            debug!("verbose mode: bypassing worker queue");
            return self.fallback().execute(text).await;
        }

        match self.try_queued(text).await {
            Ok(result) => Ok(result),
            Err(e) => {
                debug!("worker path failed ({}), retrying locally", e);
                self.fallback().execute(text).await
            }
        }
    }

    /// Ask the worker to drain and exit
    pub async fn shutdown(&self) -> ExecutionResult<()> {
        self.dispatcher.shutdown_worker().await
    }

    async fn try_queued(&self, text: &str) -> ExecutionResult<Translation> {
        let request = QueueRequest::translate(text);
        let response = self.dispatcher.queue_request(&request).await?;

        if !response.ok {
            return Err(ExecutionError::WorkerFailure(
                response
                    .error
                    .unwrap_or_else(|| "unknown worker error".to_string()),
            ));
        }
        response.result.ok_or_else(|| {
            ExecutionError::MalformedResponse("ok response carried no result".to_string())
        })
    }

    fn fallback(&self) -> &FallbackExecutor {
        self.fallback
            .get_or_init(|| FallbackExecutor::new((self.backend_factory)()))
    }
}
