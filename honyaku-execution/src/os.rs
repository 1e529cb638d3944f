//! OS process probing
//!
//! A signal-less existence check: it must never affect the target
//! process, only test whether it exists (permission to query it counts
//! as existing).

/// Whether a process with the given pid currently exists
#[cfg(unix)]
pub fn process_exists(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        // Not ours to signal, but definitely there
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Whether a process with the given pid currently exists
#[cfg(not(unix))]
pub fn process_exists(pid: u32) -> bool {
    use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

    let system = System::new_with_specifics(
        RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
    );
    system.process(Pid::from_u32(pid)).is_some()
}
