//! Dispatcher and worker lifecycle management
//!
//! The dispatcher runs inside the short-lived front-end process. It makes
//! sure a worker exists (spawning one detached if necessary), enqueues a
//! request and polls for the matching response under bounded timeouts.
//!
//! A dispatcher that gives up waiting simply stops polling; no
//! cancellation reaches the worker, which completes the abandoned request
//! and writes a response nobody reads. That orphaned file is an accepted
//! leak, bounded by request volume.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use honyaku_config::WorkerConfig;
use honyaku_ipc::{QueueDir, QueueRequest, QueueResponse};

use crate::error::{ExecutionError, ExecutionResult};
use crate::liveness::{LivenessMonitor, WorkerLiveness};

/// Seam for starting the worker process.
///
/// The real launcher forks a detached process; tests substitute an
/// in-process daemon.
pub trait WorkerLauncher: Send + Sync {
    fn launch(&self, queue_dir: &Path) -> ExecutionResult<()>;
}

/// Spawns the worker as a detached child of nobody.
///
/// The worker must outlive the front end, so it is placed in its own
/// process group and never waited on. Its stdio is discarded unless the
/// debug environment flag asks for diagnostics.
pub struct DetachedProcessLauncher {
    program: PathBuf,
    args: Vec<String>,
}

impl DetachedProcessLauncher {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// Relaunch the current executable with the worker entry argument
    pub fn from_current_exe() -> ExecutionResult<Self> {
        let program =
            std::env::current_exe().map_err(|e| ExecutionError::SpawnError(e.to_string()))?;
        Ok(Self::new(program, vec!["worker".to_string()]))
    }
}

impl WorkerLauncher for DetachedProcessLauncher {
    fn launch(&self, _queue_dir: &Path) -> ExecutionResult<()> {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::null());

        if honyaku_config::debug_enabled() {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .map_err(|e| ExecutionError::SpawnError(e.to_string()))?;
        debug!(pid = child.id(), "spawned detached worker");
        // Never waited on: the child is meant to outlive this process.
        Ok(())
    }
}

/// Front-end side of the queue: lifecycle plus request/response
pub struct Dispatcher {
    queue: QueueDir,
    config: WorkerConfig,
    launcher: Arc<dyn WorkerLauncher>,
}

impl Dispatcher {
    pub fn new(queue: QueueDir, config: WorkerConfig, launcher: Arc<dyn WorkerLauncher>) -> Self {
        Self {
            queue,
            config,
            launcher,
        }
    }

    pub fn queue(&self) -> &QueueDir {
        &self.queue
    }

    /// Make sure a worker is running, spawning one if needed.
    ///
    /// Idempotent: a live worker means an immediate return with zero
    /// spawns. Otherwise launches once and polls liveness until alive or
    /// the spawn bound elapses.
    pub async fn ensure_worker_running(&self) -> ExecutionResult<u32> {
        let monitor = LivenessMonitor::new(self.queue.clone());
        if let WorkerLiveness::Alive(pid) = monitor.check()? {
            return Ok(pid);
        }

        debug!("no live worker, spawning");
        self.launcher.launch(self.queue.root())?;

        let deadline = Instant::now() + self.config.spawn_timeout;
        loop {
            if let WorkerLiveness::Alive(pid) = monitor.check()? {
                debug!(pid, "worker became alive");
                return Ok(pid);
            }
            if Instant::now() >= deadline {
                return Err(ExecutionError::WorkerSpawnTimeout(
                    self.config.spawn_timeout.as_secs(),
                ));
            }
            tokio::time::sleep(self.config.spawn_poll_interval).await;
        }
    }

    /// Enqueue a request and wait for its response.
    ///
    /// The request is written before the worker is ensured, so work
    /// enqueued during a worker crash is picked up by the replacement.
    pub async fn queue_request(&self, request: &QueueRequest) -> ExecutionResult<QueueResponse> {
        self.queue.ensure()?;
        self.queue.write_request(request)?;
        self.ensure_worker_running().await?;
        self.await_response(&request.id).await
    }

    /// Ask a running worker to drain and exit.
    ///
    /// Shutdown travels through the queue like any other request, so it
    /// is ordered after in-flight work. Requesting it with no worker
    /// running is a usage error: nothing is written and nothing spawns.
    pub async fn shutdown_worker(&self) -> ExecutionResult<()> {
        match LivenessMonitor::new(self.queue.clone()).check()? {
            WorkerLiveness::NotRunning => Err(ExecutionError::WorkerNotRunning),
            WorkerLiveness::Alive(pid) => {
                info!(pid, "requesting worker shutdown");
                let request = QueueRequest::shutdown();
                self.queue.write_request(&request)?;
                let ack = self.await_response(&request.id).await?;
                if !ack.ok {
                    return Err(ExecutionError::WorkerFailure(
                        ack.error.unwrap_or_else(|| "shutdown rejected".to_string()),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Poll for the response file until it appears or the bound elapses.
    ///
    /// A missing file is the expected waiting state; any other error
    /// propagates immediately without retry.
    async fn await_response(&self, id: &str) -> ExecutionResult<QueueResponse> {
        let deadline = Instant::now() + self.config.response_timeout;
        loop {
            if let Some(response) = self.queue.read_response(id)? {
                return Ok(response);
            }
            if Instant::now() >= deadline {
                return Err(ExecutionError::WorkerResponseTimeout(
                    self.config.response_timeout.as_secs(),
                ));
            }
            tokio::time::sleep(self.config.response_poll_interval).await;
        }
    }
}
