//! # Downstage Values
//!
//! Wire-level value types shared between the native messaging host and the
//! file move backend.
//!
//! The browser extension and the host exchange exactly two message shapes:
//! - [`MoveRequest`] — "watch this download, then move it here"
//! - [`MoveResponse`] — success with the moved paths, or a human-readable error
//!
//! Both types serialize to the JSON the extension expects (camelCase keys,
//! optional fields omitted when empty), so they are the single source of
//! truth for the protocol payloads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod request;
pub mod response;

pub use request::MoveRequest;
pub use response::{MoveResponse, Status};
