//! Provider trait between the transport layer and the move backend.
//!
//! The native messaging host talks to the backend through this seam so that
//! the host loop, and its tests, never touch the real filesystem directly.

use async_trait::async_trait;
use downstage_values::{MoveRequest, MoveResponse};

use crate::error::MoveResult;

/// Trait the move backend implements to serve native messaging requests.
///
/// A provider processes exactly one request at a time; the host never calls
/// it concurrently. `Ok` carries the success response; `Err` carries a typed
/// [`MoveError`](crate::MoveError) that the host converts into an error
/// response on the wire.
#[async_trait]
pub trait MoveProvider: Send + Sync + 'static {
    /// Wait for the request's source file to stabilize, then move it.
    async fn execute_move(&self, request: MoveRequest) -> MoveResult<MoveResponse>;
}

// Blanket implementation so Arc<dyn MoveProvider> can be used where a
// concrete provider type is expected.
#[async_trait]
impl MoveProvider for std::sync::Arc<dyn MoveProvider> {
    async fn execute_move(&self, request: MoveRequest) -> MoveResult<MoveResponse> {
        (**self).execute_move(request).await
    }
}
