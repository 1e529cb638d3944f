//! Worker daemon loop
//!
//! One long-lived process owns one warmed-up translation engine and
//! drains the queue directory. Discovery is hybrid: a directory-change
//! subscription triggers an immediate scan, and a fixed-interval tick
//! scans regardless, because change notifications are not guaranteed to
//! fire exactly once per change on every platform. Both triggers funnel
//! into the same scan routine.

use std::collections::HashSet;
use std::path::Path;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use honyaku_engine::Translator;
use honyaku_ipc::{IpcError, QueueDir, QueueResponse, RequestLogLevel};

use crate::error::{ExecutionError, ExecutionResult};
use crate::BackendFactory;

/// The long-lived queue-draining process.
///
/// Requests are processed strictly one at a time; concurrent CLI
/// invocations are serialized by this loop, not by any lock.
pub struct WorkerDaemon {
    queue: QueueDir,
    scan_interval: std::time::Duration,
    backend_factory: BackendFactory,
    translator: Option<Translator>,
    in_flight: HashSet<String>,
}

impl WorkerDaemon {
    pub fn new(
        queue: QueueDir,
        scan_interval: std::time::Duration,
        backend_factory: BackendFactory,
    ) -> Self {
        Self {
            queue,
            scan_interval,
            backend_factory,
            translator: None,
            in_flight: HashSet::new(),
        }
    }

    /// Run until a shutdown request is drained.
    ///
    /// Writes the pid marker on startup and removes it just before
    /// returning, so the liveness monitor never sees a structurally
    /// valid marker after a clean exit.
    pub async fn run(mut self) -> ExecutionResult<()> {
        self.queue.ensure()?;

        let (wake_tx, mut wake_rx) = mpsc::unbounded_channel();
        // Subscribe before the marker goes up: a worker that failed to
        // watch the queue must never look alive. The watcher is held for
        // the daemon's lifetime; dropping it unsubscribes.
        let _watcher = watch_queue(self.queue.root(), wake_tx)?;

        let pid = std::process::id();
        self.queue.write_pid_marker(pid)?;
        info!(pid, queue = ?self.queue.root(), "worker daemon started");

        let mut tick = interval(self.scan_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = wake_rx.recv() => {}
                _ = tick.tick() => {}
            }
            if self.scan().await {
                break;
            }
        }

        self.queue.remove_pid_marker()?;
        info!(pid, "worker daemon exiting after drain");
        Ok(())
    }

    /// Scan the queue once and process everything found.
    ///
    /// Enumeration order is filesystem-dependent; no FIFO guarantee is
    /// made across concurrent dispatchers. Returns true once a shutdown
    /// request has been drained — the rest of the pass still completes,
    /// so work listed alongside the shutdown is answered first.
    async fn scan(&mut self) -> bool {
        let pending = match self.queue.pending_requests() {
            Ok(pending) => pending,
            Err(e) => {
                warn!("queue scan failed: {}", e);
                return false;
            }
        };

        let mut shutdown = false;
        for path in pending {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from)
            else {
                continue;
            };
            // Overlapping watch/tick triggers must not hand the same
            // request to two passes.
            if !self.in_flight.insert(name.clone()) {
                continue;
            }
            let requested = self.process(&path).await;
            self.in_flight.remove(&name);
            shutdown = shutdown || requested;
        }
        shutdown
    }

    /// Consume and answer one request file. Returns true for shutdown.
    async fn process(&mut self, path: &Path) -> bool {
        let request = match self.queue.take_request(path) {
            Ok(Some(request)) => request,
            // Vanished between listing and reading: a retryable gap
            Ok(None) => return false,
            Err(IpcError::MalformedRequest(e)) => {
                // Dropped without a response; the dispatcher's timeout
                // recovers it.
                debug!(?path, "dropping malformed request: {}", e);
                return false;
            }
            Err(e) => {
                warn!(?path, "failed to consume request: {}", e);
                return false;
            }
        };

        if request.is_shutdown() {
            info!(id = %request.id, "shutdown requested, draining");
            if let Err(e) = self
                .queue
                .write_response(&request.id, &QueueResponse::acknowledged())
            {
                warn!(id = %request.id, "failed to acknowledge shutdown: {}", e);
            }
            return true;
        }

        let Some(text) = request.text.clone() else {
            debug!(id = %request.id, "dropping request with no text and no command");
            return false;
        };

        let verbosity = request.log_level.unwrap_or(RequestLogLevel::Info);
        if !request.quiet && verbosity.allows(RequestLogLevel::Info) {
            info!(id = %request.id, "translating request");
        }
        if verbosity.allows(RequestLogLevel::Debug) {
            debug!(id = %request.id, chars = text.chars().count(), "translating request body");
        }
        let response = match self.translator().translate(&text).await {
            Ok(result) => QueueResponse::success(result),
            Err(e) => {
                warn!(id = %request.id, "translation failed: {}", e);
                QueueResponse::failure(e.to_string())
            }
        };
        if let Err(e) = self.queue.write_response(&request.id, &response) {
            warn!(id = %request.id, "failed to write response: {}", e);
        }
        false
    }

    /// Engine handle, constructed on first use and reused until exit
    fn translator(&mut self) -> &Translator {
        let factory = &self.backend_factory;
        self.translator.get_or_insert_with(|| {
            info!("initializing translation engine");
            Translator::new(factory())
        })
    }
}

/// Subscribe to create/modify events on the queue directory
fn watch_queue(
    root: &Path,
    wake_tx: mpsc::UnboundedSender<()>,
) -> ExecutionResult<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    let _ = wake_tx.send(());
                }
            }
            Err(e) => warn!("queue watch error: {}", e),
        },
        notify::Config::default(),
    )
    .map_err(|e| ExecutionError::WatchError(e.to_string()))?;

    watcher
        .watch(root, RecursiveMode::NonRecursive)
        .map_err(|e| ExecutionError::WatchError(e.to_string()))?;

    Ok(watcher)
}
