//! Downstage Native Messaging Crate
//!
//! Browser communication layer for the Downstage download mover.
//!
//! # Architecture
//!
//! This crate provides the native messaging host functionality:
//! - Browser native messaging protocol compliance (4-byte LE length framing)
//! - Type-safe request/response handling via `downstage-values`
//! - Pluggable move backend via the `MoveProvider` trait from
//!   `downstage-fileops`
//!
//! The host serves one request at a time: read a frame, execute the move,
//! write exactly one response frame, repeat. It exits cleanly when the
//! browser closes its end at a frame boundary and exits with an error when
//! the byte stream breaks mid-frame.
//!
//! # Usage
//!
//! ```rust,no_run
//! use downstage_fileops::FileMover;
//! use downstage_native_messaging::HostConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mover = FileMover::with_defaults();
//!     let config = HostConfig::default();
//!     downstage_native_messaging::run_host(mover, config).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod error;
mod protocol;

// Re-export public API
pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use protocol::{
    decode_request, decode_response, encode_request, encode_response, NativeMessagingChannel,
    ReadOutcome,
};

use downstage_fileops::MoveProvider;
use downstage_values::MoveResponse;
use tokio::io::{AsyncRead, AsyncWrite};

/// Native messaging host for the browser extension.
///
/// Generic over the byte streams so tests can drive it through in-memory
/// duplex pipes; production wires it to stdio via [`NativeMessagingHost::stdio`].
pub struct NativeMessagingHost<P, R, W> {
    provider: P,
    channel: NativeMessagingChannel<R, W>,
}

impl<P> NativeMessagingHost<P, tokio::io::Stdin, tokio::io::Stdout>
where
    P: MoveProvider,
{
    /// Create a host bound to the process's standard streams.
    pub fn stdio(provider: P, config: &HostConfig) -> Self {
        Self {
            provider,
            channel: NativeMessagingChannel::stdio(config),
        }
    }
}

impl<P, R, W> NativeMessagingHost<P, R, W>
where
    P: MoveProvider,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a host over arbitrary streams.
    pub fn new(provider: P, channel: NativeMessagingChannel<R, W>) -> Self {
        Self { provider, channel }
    }

    /// Run the main message processing loop.
    ///
    /// Returns `Ok(())` when the peer disconnects at a frame boundary.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream breaks mid-frame or a hard I/O
    /// failure makes further framing impossible.
    pub async fn run(mut self) -> anyhow::Result<()> {
        tracing::info!("Downstage native messaging host starting message loop");

        loop {
            let response = match self.channel.read_request().await? {
                ReadOutcome::Disconnected => {
                    tracing::info!("Peer disconnected, shutting down");
                    return Ok(());
                }
                ReadOutcome::Malformed(detail) => {
                    tracing::error!(detail = %detail, "Received malformed message");
                    MoveResponse::error(format!("Daemon internal error: {detail}"))
                }
                ReadOutcome::Request(request) => {
                    tracing::debug!(
                        filename = %request.filename,
                        destination = %request.full_destination_path,
                        "Processing move request"
                    );

                    match self.provider.execute_move(request).await {
                        Ok(response) => response,
                        Err(e) => {
                            tracing::error!(
                                code = e.error_code(),
                                error = %e,
                                "Move request failed"
                            );
                            MoveResponse::error(e.to_string())
                        }
                    }
                }
            };

            // A failed write is not fatal; the next read decides whether the
            // stream is still usable.
            if let Err(e) = self.channel.write_response(&response).await {
                tracing::error!(error = %e, "Failed to send response");
            }
        }
    }
}

/// Run the native messaging host over stdin/stdout.
///
/// This is the main entry point for starting the host that communicates
/// with the browser extension.
///
/// # Arguments
///
/// * `provider` - Move backend implementing `MoveProvider`
/// * `config` - Host configuration
///
/// # Errors
///
/// Returns an error if the stdio streams break mid-frame or fail outright.
/// A clean disconnect by the browser is not an error.
pub async fn run_host<P>(provider: P, config: HostConfig) -> anyhow::Result<()>
where
    P: MoveProvider,
{
    NativeMessagingHost::stdio(provider, &config).run().await
}
