//! Queue protocol definitions and message types
//!
//! Queue files are camelCase JSON so that both sides of the process
//! boundary agree on an explicit external format, independent of Rust
//! field naming.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File name prefix for request files
pub const REQUEST_PREFIX: &str = "req-";

/// File name prefix for response files
pub const RESPONSE_PREFIX: &str = "res-";

/// Extension shared by request and response files
pub const QUEUE_FILE_EXT: &str = "json";

/// Fixed file name of the worker pid marker
pub const PID_MARKER_NAME: &str = "worker.pid";

/// Generate a request id unique among concurrently outstanding requests.
///
/// Millisecond timestamp plus a random suffix; there is no central
/// allocator, so global uniqueness rests on the random part.
pub fn new_request_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}

/// Commands a request can carry instead of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestCommand {
    /// Ask the worker to drain and exit
    Shutdown,
}

/// Per-request verbosity hint for the worker's diagnostics.
///
/// Protocol-local rather than borrowed from the config crate: the wire
/// format is an external interface and must not move when config types do.
/// Variants are ordered from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl RequestLogLevel {
    /// Whether events of the given severity should be emitted under this
    /// verbosity
    pub fn allows(self, severity: RequestLogLevel) -> bool {
        self >= severity
    }
}

/// A unit of work enqueued by the dispatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRequest {
    pub id: String,

    /// Text to translate; absent for command requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<RequestCommand>,

    /// Suppress non-essential worker diagnostics for this request
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub quiet: bool,

    /// Worker verbosity for this request; absent means the worker default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<RequestLogLevel>,
}

impl QueueRequest {
    /// Create a translation request with a fresh id
    pub fn translate(text: impl Into<String>) -> Self {
        Self {
            id: new_request_id(),
            text: Some(text.into()),
            command: None,
            quiet: false,
            log_level: None,
        }
    }

    /// Create a shutdown request with a fresh id
    pub fn shutdown() -> Self {
        Self {
            id: new_request_id(),
            text: None,
            command: Some(RequestCommand::Shutdown),
            quiet: false,
            log_level: None,
        }
    }

    /// Set the worker verbosity for this request
    pub fn with_log_level(mut self, level: RequestLogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Whether this request asks the worker to exit
    pub fn is_shutdown(&self) -> bool {
        self.command == Some(RequestCommand::Shutdown)
    }
}

/// Worker answer keyed by the originating request id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Translation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueueResponse {
    /// Create a successful response
    pub fn success(result: Translation) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create a failed response with a stringified error
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Create the acknowledgment written for a shutdown request
    pub fn acknowledged() -> Self {
        Self {
            ok: true,
            result: None,
            error: None,
        }
    }
}

/// Result of one translation, produced by the engine boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    pub original_text: String,
    pub was_japanese: bool,
    pub provider: String,
    pub duration_ms: i64,
}

/// File name for the request with the given id
pub fn request_file_name(id: &str) -> String {
    format!("{}{}.{}", REQUEST_PREFIX, id, QUEUE_FILE_EXT)
}

/// File name for the response with the given id
pub fn response_file_name(id: &str) -> String {
    format!("{}{}.{}", RESPONSE_PREFIX, id, QUEUE_FILE_EXT)
}

/// Extract the request id from a request file name, if it is one
pub fn request_id_from_file_name(name: &str) -> Option<&str> {
    let stem = name.strip_suffix(&format!(".{}", QUEUE_FILE_EXT))?;
    let id = stem.strip_prefix(REQUEST_PREFIX)?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_request_wire_format() {
        let request = QueueRequest::translate("こんにちは");
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"id\""));
        assert!(json.contains("\"text\":\"こんにちは\""));
        // Absent fields stay off the wire entirely
        assert!(!json.contains("command"));
        assert!(!json.contains("quiet"));
        assert!(!json.contains("logLevel"));

        let parsed: QueueRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, request.id);
        assert_eq!(parsed.text.as_deref(), Some("こんにちは"));
        assert!(!parsed.is_shutdown());
    }

    #[test]
    fn test_shutdown_request_wire_format() {
        let request = QueueRequest::shutdown();
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"command\":\"shutdown\""));
        assert!(!json.contains("\"text\""));

        let parsed: QueueRequest = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_shutdown());
        assert!(parsed.text.is_none());
    }

    #[test]
    fn test_log_level_wire_format() {
        let request =
            QueueRequest::translate("こんにちは").with_log_level(RequestLogLevel::Debug);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"logLevel\":\"debug\""));

        let parsed: QueueRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.log_level, Some(RequestLogLevel::Debug));

        // Absent on the wire parses as unset, not as a default level
        let parsed: QueueRequest =
            serde_json::from_str(r#"{"id":"r1","text":"x"}"#).unwrap();
        assert_eq!(parsed.log_level, None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(RequestLogLevel::Trace.allows(RequestLogLevel::Debug));
        assert!(RequestLogLevel::Debug.allows(RequestLogLevel::Debug));
        assert!(!RequestLogLevel::Info.allows(RequestLogLevel::Debug));
        assert!(RequestLogLevel::Error.allows(RequestLogLevel::Error));
    }

    #[test]
    fn test_response_wire_format_is_camel_case() {
        let response = QueueResponse::success(Translation {
            translated_text: "Hello".to_string(),
            original_text: "こんにちは".to_string(),
            was_japanese: true,
            provider: "libretranslate".to_string(),
            duration_ms: 42,
        });

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"translatedText\":\"Hello\""));
        assert!(json.contains("\"originalText\""));
        assert!(json.contains("\"wasJapanese\":true"));
        assert!(json.contains("\"durationMs\":42"));

        let parsed: QueueResponse = serde_json::from_str(&json).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.result.unwrap().translated_text, "Hello");
    }

    #[test]
    fn test_failure_response() {
        let response = QueueResponse::failure("engine exploded");
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.error.as_deref(), Some("engine exploded"));
    }

    #[test]
    fn test_file_name_round_trip() {
        let name = request_file_name("1700000000000-abc");
        assert_eq!(name, "req-1700000000000-abc.json");
        assert_eq!(
            request_id_from_file_name(&name),
            Some("1700000000000-abc")
        );

        assert_eq!(request_id_from_file_name("res-xyz.json"), None);
        assert_eq!(request_id_from_file_name("req-.json"), None);
        assert_eq!(request_id_from_file_name("worker.pid"), None);
    }
}
