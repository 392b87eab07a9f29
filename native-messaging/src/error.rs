//! Error types for the native messaging channel.
//!
//! Channel errors split in two: faults where the next frame boundary is
//! still known (handled inline, the loop keeps reading) and structural
//! faults where it is not (the process must exit, since resynchronizing on
//! a byte stream with no framing recovery is impossible). Only the latter
//! surface as `HostError` from the read path.

use std::io;

/// Result type for host channel operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors produced by the native messaging channel and host loop.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Protocol-level fault: the frame structure itself is broken.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// I/O failure on the underlying streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization failure for an outgoing response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostError {
    /// Create a protocol error.
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol(message.into())
    }

    /// Get the error code for this error category.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Protocol(_) => "PROTOCOL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}
