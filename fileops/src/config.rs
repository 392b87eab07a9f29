//! Configuration for the stability polling loop.

use std::time::Duration;

use crate::error::{MoveError, MoveResult};

/// Polling parameters for the wait-for-stability loop.
///
/// The defaults match the reference behavior the extension was built
/// against: one probe per second, sixty probes, for a sixty second
/// wall-clock ceiling. Tests shrink both values to keep runs fast.
#[derive(Debug, Clone)]
pub struct MoverConfig {
    /// Time between consecutive size probes of the source path.
    pub poll_interval: Duration,

    /// Maximum number of probes before falling through to verification.
    pub max_poll_attempts: u32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 60,
        }
    }
}

impl MoverConfig {
    /// Validate the configuration.
    ///
    /// Called by [`FileMover::new`](crate::FileMover::new), so an invalid
    /// combination never reaches the polling loop.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidConfig`] if either parameter is zero.
    pub fn validate(&self) -> MoveResult<()> {
        if self.poll_interval.is_zero() {
            return Err(MoveError::invalid_config(
                "poll_interval must be greater than zero",
            ));
        }
        if self.max_poll_attempts == 0 {
            return Err(MoveError::invalid_config(
                "max_poll_attempts must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MoverConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.max_poll_attempts, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MoverConfig::default();

        config.poll_interval = Duration::ZERO;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(err.to_string().contains("poll_interval"));

        config.poll_interval = Duration::from_millis(10);
        config.max_poll_attempts = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(err.to_string().contains("max_poll_attempts"));
    }
}
