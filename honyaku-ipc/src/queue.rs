//! Queue directory operations
//!
//! The queue directory is shared, lock-free state. The only primitives
//! relied upon are directory creation, whole-file write and file deletion
//! each being atomic at the filesystem level; there is no cross-operation
//! transaction. Deleting a file immediately after reading it is what turns
//! the directory into a queue: the directory listing itself is the set of
//! unprocessed work.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{IpcError, IpcResult};
use crate::protocol::{
    request_file_name, response_file_name, QueueRequest, QueueResponse, PID_MARKER_NAME,
    QUEUE_FILE_EXT, REQUEST_PREFIX,
};

/// Handle to the shared queue directory.
///
/// Request and response writes are single whole-file writes, not
/// rename-based; a non-blocking reader can observe a partially written
/// file on some storage backends. That narrow race is accepted: a torn
/// read parses as malformed and the sender's timeout recovers it.
#[derive(Debug, Clone)]
pub struct QueueDir {
    root: PathBuf,
}

impl QueueDir {
    /// Create a handle rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory backing this queue
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the queue directory if it does not exist yet
    pub fn ensure(&self) -> IpcResult<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Write a request file, returning its path
    pub fn write_request(&self, request: &QueueRequest) -> IpcResult<PathBuf> {
        let path = self.root.join(request_file_name(&request.id));
        let body = serde_json::to_vec(request)
            .map_err(|e| IpcError::SerializationError(e.to_string()))?;
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Write the response for the given request id, returning its path
    pub fn write_response(&self, id: &str, response: &QueueResponse) -> IpcResult<PathBuf> {
        let path = self.root.join(response_file_name(id));
        let body = serde_json::to_vec(response)
            .map_err(|e| IpcError::SerializationError(e.to_string()))?;
        fs::write(&path, body)?;
        Ok(path)
    }

    /// List pending request files.
    ///
    /// Order is whatever the filesystem enumerates; no FIFO guarantee
    /// exists across concurrent dispatchers.
    pub fn pending_requests(&self) -> IpcResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // Directory not created yet means nothing is pending
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(paths),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(REQUEST_PREFIX) && name.ends_with(&format!(".{}", QUEUE_FILE_EXT))
            {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }

    /// Consume a request file: read it, delete it, then parse it.
    ///
    /// Deletion happens before parsing so a request is consumed at most
    /// once even when its body turns out to be garbage. Returns `Ok(None)`
    /// when the file vanished between listing and reading, which is a
    /// retryable gap rather than an error.
    pub fn take_request(&self, path: &Path) -> IpcResult<Option<QueueRequest>> {
        let body = match fs::read_to_string(path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        fs::remove_file(path)?;

        let request: QueueRequest = serde_json::from_str(&body)
            .map_err(|e| IpcError::MalformedRequest(e.to_string()))?;
        if request.id.is_empty() {
            return Err(IpcError::MalformedRequest("missing request id".to_string()));
        }
        Ok(Some(request))
    }

    /// Look for the response to the given request id.
    ///
    /// `Ok(None)` means the response has not been written yet — the
    /// expected waiting state while polling. A found file is deleted
    /// before parsing, so at most one reader ever observes it.
    pub fn read_response(&self, id: &str) -> IpcResult<Option<QueueResponse>> {
        let path = self.root.join(response_file_name(id));
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        fs::remove_file(&path)?;

        let response: QueueResponse = serde_json::from_str(&body)
            .map_err(|e| IpcError::MalformedResponse(e.to_string()))?;
        Ok(Some(response))
    }

    /// Path of the pid marker file
    pub fn pid_marker_path(&self) -> PathBuf {
        self.root.join(PID_MARKER_NAME)
    }

    /// Record the given pid as the current worker
    pub fn write_pid_marker(&self, pid: u32) -> IpcResult<()> {
        fs::write(self.pid_marker_path(), pid.to_string())?;
        Ok(())
    }

    /// Read the worker pid, if a usable marker exists.
    ///
    /// An unparsable marker is deleted on sight: no live worker can have
    /// written it, and leaving it in place would wedge every future probe.
    pub fn read_pid_marker(&self) -> IpcResult<Option<u32>> {
        let path = self.pid_marker_path();
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match body.trim().parse::<u32>() {
            Ok(pid) => Ok(Some(pid)),
            Err(_) => {
                warn!("removing unparsable pid marker at {:?}", path);
                let _ = fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    /// Remove the pid marker, ignoring an already-absent file
    pub fn remove_pid_marker(&self) -> IpcResult<()> {
        match fs::remove_file(self.pid_marker_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn queue() -> (TempDir, QueueDir) {
        let dir = TempDir::new().unwrap();
        let queue = QueueDir::new(dir.path());
        queue.ensure().unwrap();
        (dir, queue)
    }

    #[test]
    fn test_request_round_trip_consumes_file() {
        let (_dir, queue) = queue();

        let request = QueueRequest::translate("こんにちは");
        let path = queue.write_request(&request).unwrap();
        assert!(path.exists());

        let pending = queue.pending_requests().unwrap();
        assert_eq!(pending.len(), 1);

        let taken = queue.take_request(&pending[0]).unwrap().unwrap();
        assert_eq!(taken.id, request.id);
        assert_eq!(taken.text.as_deref(), Some("こんにちは"));

        // Consumed: file gone, nothing pending
        assert!(!path.exists());
        assert!(queue.pending_requests().unwrap().is_empty());
    }

    #[test]
    fn test_take_request_tolerates_vanished_file() {
        let (_dir, queue) = queue();
        let gone = queue.root().join("req-nothere.json");
        assert!(queue.take_request(&gone).unwrap().is_none());
    }

    #[test]
    fn test_malformed_request_is_still_consumed() {
        let (_dir, queue) = queue();
        let path = queue.root().join("req-bad.json");
        fs::write(&path, "{not json").unwrap();

        let err = queue.take_request(&path).unwrap_err();
        assert!(matches!(err, IpcError::MalformedRequest(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_request_without_id_is_malformed() {
        let (_dir, queue) = queue();
        let path = queue.root().join("req-noid.json");
        fs::write(&path, r#"{"id":"","text":"x"}"#).unwrap();

        let err = queue.take_request(&path).unwrap_err();
        assert!(matches!(err, IpcError::MalformedRequest(_)));
    }

    #[test]
    fn test_response_polling_then_single_read() {
        let (_dir, queue) = queue();

        // Nothing written yet: the waiting state, not an error
        assert!(queue.read_response("r1").unwrap().is_none());

        let response = QueueResponse::failure("nope");
        queue.write_response("r1", &response).unwrap();

        let read = queue.read_response("r1").unwrap().unwrap();
        assert!(!read.ok);

        // Deleted on first read; a second reader sees nothing
        assert!(queue.read_response("r1").unwrap().is_none());
    }

    #[test]
    fn test_pending_requests_ignores_other_files() {
        let (_dir, queue) = queue();
        queue.write_request(&QueueRequest::translate("a")).unwrap();
        queue
            .write_response("other", &QueueResponse::acknowledged())
            .unwrap();
        queue.write_pid_marker(1234).unwrap();

        assert_eq!(queue.pending_requests().unwrap().len(), 1);
    }

    #[test]
    fn test_pending_requests_on_missing_dir() {
        let dir = TempDir::new().unwrap();
        let queue = QueueDir::new(dir.path().join("never-created"));
        assert!(queue.pending_requests().unwrap().is_empty());
    }

    #[test]
    fn test_pid_marker_round_trip() {
        let (_dir, queue) = queue();

        assert!(queue.read_pid_marker().unwrap().is_none());
        queue.write_pid_marker(4242).unwrap();
        assert_eq!(queue.read_pid_marker().unwrap(), Some(4242));

        queue.remove_pid_marker().unwrap();
        assert!(queue.read_pid_marker().unwrap().is_none());
        // Removing twice is fine
        queue.remove_pid_marker().unwrap();
    }

    #[test]
    fn test_unparsable_pid_marker_is_removed() {
        let (_dir, queue) = queue();
        fs::write(queue.pid_marker_path(), "not-a-pid").unwrap();

        assert!(queue.read_pid_marker().unwrap().is_none());
        assert!(!queue.pid_marker_path().exists());
    }
}
