//! Worker liveness monitoring
//!
//! The pid marker is the only durable record of worker identity. Its
//! absence, or a marker pointing at a dead process, is definitional of
//! "not running". A crashed worker leaves no one to clean up after
//! itself, so the monitor removes stale markers as it finds them.

use tracing::debug;

use honyaku_ipc::QueueDir;

use crate::error::ExecutionResult;
use crate::os;

/// Observed worker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerLiveness {
    /// No usable pid marker, or the recorded process is gone
    NotRunning,
    /// A process with the recorded pid exists
    Alive(u32),
}

/// Probes the pid marker against actual process existence
#[derive(Debug, Clone)]
pub struct LivenessMonitor {
    queue: QueueDir,
}

impl LivenessMonitor {
    pub fn new(queue: QueueDir) -> Self {
        Self { queue }
    }

    /// Check whether a worker is currently running, self-healing any
    /// stale marker found along the way.
    pub fn check(&self) -> ExecutionResult<WorkerLiveness> {
        let Some(pid) = self.queue.read_pid_marker()? else {
            return Ok(WorkerLiveness::NotRunning);
        };

        if os::process_exists(pid) {
            Ok(WorkerLiveness::Alive(pid))
        } else {
            debug!(pid, "removing stale pid marker for dead worker");
            self.queue.remove_pid_marker()?;
            Ok(WorkerLiveness::NotRunning)
        }
    }
}
