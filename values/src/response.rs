//! Outgoing response payload to the browser extension.

use serde::{Deserialize, Serialize};

/// Outcome of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The file was stabilized and moved to its destination.
    Success,
    /// The request failed; `message` carries the reason.
    Error,
}

/// Response to a [`MoveRequest`](crate::MoveRequest).
///
/// The status fully determines which optional fields are populated:
/// success carries `movedFrom`/`movedTo` and no message, error carries a
/// message and no paths. Optional fields are omitted from the JSON entirely
/// rather than serialized as null, matching what the extension parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Success or error.
    pub status: Status,

    /// Human-readable failure reason (error responses only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Source path the file was moved from (success responses only).
    #[serde(rename = "movedFrom", skip_serializing_if = "Option::is_none")]
    pub moved_from: Option<String>,

    /// Destination path the file was moved to (success responses only).
    #[serde(rename = "movedTo", skip_serializing_if = "Option::is_none")]
    pub moved_to: Option<String>,
}

impl MoveResponse {
    /// Create a success response with the moved paths.
    pub fn success(moved_from: impl Into<String>, moved_to: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            moved_from: Some(moved_from.into()),
            moved_to: Some(moved_to.into()),
        }
    }

    /// Create an error response with a failure reason.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            moved_from: None,
            moved_to: None,
        }
    }

    /// Whether this response reports success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let response = MoveResponse::success("/tmp/a/download.bin", "/tmp/b/out/download.bin");

        assert!(response.is_success());
        assert_eq!(response.moved_from.as_deref(), Some("/tmp/a/download.bin"));
        assert_eq!(response.moved_to.as_deref(), Some("/tmp/b/out/download.bin"));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let response = MoveResponse::error("File already exists at destination: /dst/file");

        assert!(!response.is_success());
        assert!(response.moved_from.is_none());
        assert!(response.moved_to.is_none());
        assert!(response.message.unwrap().contains("/dst/file"));
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let json = serde_json::to_string(&MoveResponse::success("/a", "/b")).unwrap();
        assert!(!json.contains("message"));
        assert!(json.contains("\"movedFrom\":\"/a\""));
        assert!(json.contains("\"movedTo\":\"/b\""));
        assert!(json.contains("\"status\":\"success\""));

        let json = serde_json::to_string(&MoveResponse::error("boom")).unwrap();
        assert!(!json.contains("movedFrom"));
        assert!(!json.contains("movedTo"));
        assert!(json.contains("\"status\":\"error\""));
    }

    #[test]
    fn test_json_round_trip() {
        for response in [
            MoveResponse::success("/tmp/a", "/tmp/b"),
            MoveResponse::error("Invalid message format"),
        ] {
            let json = serde_json::to_string(&response).unwrap();
            let decoded: MoveResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, response);
        }
    }
}
