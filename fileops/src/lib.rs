//! # Downstage Fileops
//!
//! The move backend behind the Downstage native messaging host.
//!
//! A request names a source path (a download the browser just started) and a
//! destination path. The backend polls the source until its size stops
//! changing, verifies it holds data, then moves it with copy-then-delete
//! semantics so destinations on other filesystems work. Every failure is a
//! typed [`MoveError`] that the host turns into an error response; nothing
//! here terminates the process.
//!
//! # Pipeline
//!
//! ```text
//! Validating -> Polling -> Verifying -> Copying -> Deleting -> Done
//! ```
//!
//! Stability rule: two consecutive size probes, one poll interval apart,
//! equal and non-zero. A zero-byte sample never counts, no matter how often
//! it repeats.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod error;
mod mover;
mod traits;

pub use config::MoverConfig;
pub use error::{MoveError, MoveResult};
pub use mover::FileMover;
pub use traits::MoveProvider;
