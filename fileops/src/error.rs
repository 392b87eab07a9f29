//! Error types for the move pipeline.
//!
//! Every filesystem failure is converted to a typed error at the point of
//! origin and surfaced to the extension as an error response; none of these
//! terminate the host process. The `Display` output is the exact message the
//! extension sees, so each variant names the offending path.

use std::io;
use std::path::{Path, PathBuf};

/// Result type for move operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// Errors produced while stabilizing and moving a download.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// Polling parameters were rejected at construction; never reaches the
    /// wire since no mover exists to serve requests.
    #[error("Invalid mover configuration: {detail}")]
    InvalidConfig {
        /// Which parameter was rejected and why.
        detail: String,
    },

    /// Request was missing a required field; no filesystem access happened.
    #[error("Invalid message format: filename or fullDestinationPath missing")]
    InvalidRequest,

    /// Probing the source path failed for a reason other than "not found".
    #[error("Error checking file status: {path}: {source}")]
    SourceCheckFailed {
        /// Source path being probed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Source never appeared, or was still empty, once polling ended.
    #[error("File did not appear or was empty: {path}")]
    SourceMissingOrEmpty {
        /// Source path that was watched.
        path: PathBuf,
    },

    /// Destination path is already occupied; the move was never attempted.
    #[error("File already exists at destination: {path}")]
    DestinationAlreadyExists {
        /// Occupied destination path.
        path: PathBuf,
    },

    /// Probing the destination failed for a reason other than "not found".
    #[error("Error checking destination file status: {path}: {source}")]
    DestinationCheckFailed {
        /// Destination path being probed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Could not create the destination's parent directories.
    #[error("Failed to create destination directory: {path}: {source}")]
    DirectoryCreateFailed {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Byte-stream copy failed at open, write, or flush.
    #[error("Failed to copy file: {path}: {source}")]
    CopyFailed {
        /// Path involved in the failed copy step.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl MoveError {
    /// Create an invalid-config error.
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }

    /// Create a source-check error.
    pub fn source_check(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::SourceCheckFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a source-missing-or-empty error.
    pub fn source_missing_or_empty(path: impl AsRef<Path>) -> Self {
        Self::SourceMissingOrEmpty {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a destination-already-exists error.
    pub fn destination_already_exists(path: impl AsRef<Path>) -> Self {
        Self::DestinationAlreadyExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a destination-check error.
    pub fn destination_check(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::DestinationCheckFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a directory-create error.
    pub fn directory_create(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::DirectoryCreateFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a copy error.
    pub fn copy(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::CopyFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Get the error code for this error category.
    ///
    /// The wire format carries only the human-readable message, but tests
    /// and logging distinguish categories through this code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::SourceCheckFailed { .. } => "SOURCE_CHECK_FAILED",
            Self::SourceMissingOrEmpty { .. } => "SOURCE_MISSING_OR_EMPTY",
            Self::DestinationAlreadyExists { .. } => "DESTINATION_ALREADY_EXISTS",
            Self::DestinationCheckFailed { .. } => "DESTINATION_CHECK_FAILED",
            Self::DirectoryCreateFailed { .. } => "DIRECTORY_CREATE_FAILED",
            Self::CopyFailed { .. } => "COPY_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MoveError::invalid_config("poll_interval must be greater than zero").error_code(),
            "INVALID_CONFIG"
        );
        assert_eq!(MoveError::InvalidRequest.error_code(), "INVALID_REQUEST");
        assert_eq!(
            MoveError::source_check("/a", io_error()).error_code(),
            "SOURCE_CHECK_FAILED"
        );
        assert_eq!(
            MoveError::source_missing_or_empty("/a").error_code(),
            "SOURCE_MISSING_OR_EMPTY"
        );
        assert_eq!(
            MoveError::destination_already_exists("/b").error_code(),
            "DESTINATION_ALREADY_EXISTS"
        );
        assert_eq!(
            MoveError::destination_check("/b", io_error()).error_code(),
            "DESTINATION_CHECK_FAILED"
        );
        assert_eq!(
            MoveError::directory_create("/b", io_error()).error_code(),
            "DIRECTORY_CREATE_FAILED"
        );
        assert_eq!(MoveError::copy("/b", io_error()).error_code(), "COPY_FAILED");
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = MoveError::source_missing_or_empty("/tmp/a/download.bin");
        assert!(err.to_string().contains("/tmp/a/download.bin"));

        let err = MoveError::destination_already_exists("/tmp/b/out/download.bin");
        assert!(err.to_string().contains("/tmp/b/out/download.bin"));
    }

    #[test]
    fn test_source_error_is_preserved() {
        use std::error::Error;

        let err = MoveError::copy("/b", io_error());
        assert!(err.source().is_some());
    }
}
