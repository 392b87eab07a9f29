//! The wait-for-stability-then-move pipeline.
//!
//! Each request runs the same sequence: validate the fields, poll the source
//! path until its size stops changing, verify it actually holds data, check
//! the destination is free, then copy and delete. The copy is a byte-stream
//! copy rather than a rename so destinations on other volumes work
//! transparently.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use downstage_values::{MoveRequest, MoveResponse};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::MoverConfig;
use crate::error::{MoveError, MoveResult};
use crate::traits::MoveProvider;

/// Move backend driving the stabilization and move pipeline.
#[derive(Debug, Clone)]
pub struct FileMover {
    config: MoverConfig,
}

impl FileMover {
    /// Create a mover with explicit polling parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidConfig`] if the config fails
    /// [`MoverConfig::validate`].
    pub fn new(config: MoverConfig) -> MoveResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a mover with the reference polling parameters (1s x 60).
    pub fn with_defaults() -> Self {
        Self {
            config: MoverConfig::default(),
        }
    }

    /// Poll the source path until two consecutive probes observe the same
    /// non-zero size, or the attempt ceiling is reached.
    ///
    /// A missing path records no sample and keeps polling: the download may
    /// not have started writing to this exact path yet. Reaching the ceiling
    /// is not an error here; the final verification makes that call.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SourceCheckFailed`] if a probe fails for any
    /// reason other than the path not existing.
    async fn wait_for_stable(&self, source: &Path) -> MoveResult<()> {
        let mut last_size: Option<u64> = None;

        for attempt in 0..self.config.max_poll_attempts {
            match fs::metadata(source).await {
                Ok(metadata) => {
                    let size = metadata.len();
                    if size > 0 && last_size == Some(size) {
                        tracing::debug!(
                            source = %source.display(),
                            size,
                            attempt,
                            "source file size stable"
                        );
                        return Ok(());
                    }
                    last_size = Some(size);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    // Not started writing yet; no sample recorded.
                }
                Err(e) => return Err(MoveError::source_check(source, e)),
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }

        tracing::debug!(
            source = %source.display(),
            attempts = self.config.max_poll_attempts,
            "polling ceiling reached without stability; deferring to verification"
        );
        Ok(())
    }

    /// Re-probe the source once after polling ends.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SourceMissingOrEmpty`] if the path is missing or
    /// zero bytes, [`MoveError::SourceCheckFailed`] on any other probe
    /// failure.
    async fn verify_source(&self, source: &Path) -> MoveResult<()> {
        match fs::metadata(source).await {
            Ok(metadata) if metadata.len() > 0 => Ok(()),
            Ok(_) => Err(MoveError::source_missing_or_empty(source)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(MoveError::source_missing_or_empty(source))
            }
            Err(e) => Err(MoveError::source_check(source, e)),
        }
    }

    /// Refuse to overwrite an existing destination.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::DestinationAlreadyExists`] if the path is
    /// occupied, [`MoveError::DestinationCheckFailed`] if the existence probe
    /// fails for any reason other than "not found".
    async fn check_destination(&self, destination: &Path) -> MoveResult<()> {
        match fs::metadata(destination).await {
            Ok(_) => Err(MoveError::destination_already_exists(destination)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MoveError::destination_check(destination, e)),
        }
    }

    /// Byte-stream copy from source to destination.
    ///
    /// A partially written destination is removed best-effort when the copy
    /// fails, so a failed request never leaves a corrupt artifact behind.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CopyFailed`] if open, create, write, or flush
    /// fails.
    async fn copy_contents(&self, source: &Path, destination: &Path) -> MoveResult<()> {
        let mut reader = fs::File::open(source)
            .await
            .map_err(|e| MoveError::copy(source, e))?;
        let mut writer = fs::File::create(destination)
            .await
            .map_err(|e| MoveError::copy(destination, e))?;

        let copy_result = async {
            tokio::io::copy(&mut reader, &mut writer).await?;
            writer.flush().await
        }
        .await;

        if let Err(e) = copy_result {
            if let Err(cleanup_err) = fs::remove_file(destination).await {
                tracing::warn!(
                    destination = %destination.display(),
                    error = %cleanup_err,
                    "failed to remove partial destination after copy failure"
                );
            }
            return Err(MoveError::copy(destination, e));
        }

        Ok(())
    }
}

#[async_trait]
impl MoveProvider for FileMover {
    async fn execute_move(&self, request: MoveRequest) -> MoveResult<MoveResponse> {
        // Field validation short-circuits before any filesystem access.
        if !request.is_valid() {
            return Err(MoveError::InvalidRequest);
        }

        let source = Path::new(&request.filename);
        let destination = Path::new(&request.full_destination_path);

        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            "processing move request"
        );

        self.wait_for_stable(source).await?;
        self.verify_source(source).await?;
        self.check_destination(destination).await?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MoveError::directory_create(parent, e))?;
        }

        self.copy_contents(source, destination).await?;

        // Deletion failure after a successful copy does not fail the request;
        // the copy already landed, so the move is reported as success.
        if let Err(e) = fs::remove_file(source).await {
            tracing::warn!(
                source = %source.display(),
                error = %e,
                "failed to remove original file after successful copy"
            );
        }

        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            "move completed"
        );

        Ok(MoveResponse::success(
            request.filename,
            request.full_destination_path,
        ))
    }
}
