//! File-queue IPC primitives for Honyaku
//!
//! The dispatcher and the background worker communicate through plain JSON
//! files in a shared queue directory. This crate owns the wire types, the
//! file naming scheme and the create/read/delete conventions that make the
//! directory behave as a queue.

pub mod error;
pub mod protocol;
pub mod queue;

pub use error::{IpcError, IpcResult};
pub use protocol::{
    new_request_id, QueueRequest, QueueResponse, RequestCommand, RequestLogLevel, Translation,
};
pub use queue::QueueDir;
