//! Incoming request payload from the browser extension.

use serde::{Deserialize, Serialize};

/// Request to move a finished download to its final destination.
///
/// Sent by the extension as soon as the browser reports a new download.
/// The file may still be mid-write when the request arrives; stabilization
/// is the backend's job, not the extension's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Full source path of the download to watch.
    ///
    /// Missing fields decode as empty strings; [`MoveRequest::is_valid`]
    /// rejects them with a request-level error instead of a decode failure.
    #[serde(default)]
    pub filename: String,

    /// Absolute destination path, including the target filename.
    #[serde(default, rename = "fullDestinationPath")]
    pub full_destination_path: String,
}

impl MoveRequest {
    /// Create a request from source and destination paths.
    pub fn new(filename: impl Into<String>, full_destination_path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            full_destination_path: full_destination_path.into(),
        }
    }

    /// Check that both mandatory fields are present and non-empty.
    ///
    /// Validation is deliberately string-level only: no filesystem access
    /// happens here or anywhere before polling starts.
    pub fn is_valid(&self) -> bool {
        !self.filename.is_empty() && !self.full_destination_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_wire_keys() {
        let json = r#"{"filename":"/tmp/a/download.bin","fullDestinationPath":"/tmp/b/out/download.bin"}"#;
        let request: MoveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.filename, "/tmp/a/download.bin");
        assert_eq!(request.full_destination_path, "/tmp/b/out/download.bin");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = MoveRequest::new("/src/file", "/dst/file");
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"fullDestinationPath\""));
        assert!(!json.contains("full_destination_path"));
    }

    #[test]
    fn test_missing_field_decodes_as_empty() {
        let json = r#"{"filename":"/src/file"}"#;
        let request: MoveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.filename, "/src/file");
        assert!(request.full_destination_path.is_empty());
        assert!(!request.is_valid());
    }

    #[test]
    fn test_validation() {
        assert!(MoveRequest::new("/src/file", "/dst/file").is_valid());
        assert!(!MoveRequest::new("", "/dst/file").is_valid());
        assert!(!MoveRequest::new("/src/file", "").is_valid());
        assert!(!MoveRequest::new("", "").is_valid());
    }
}
