//! Configuration for the native messaging host.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chrome caps native messages at 1MB in the extension-bound direction.
const CHROME_MESSAGE_LIMIT: usize = 1_048_576;

/// Configuration for the native messaging host.
///
/// The host itself never persists anything; this is load-only, from an
/// optional file passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Maximum accepted frame payload in bytes (Chrome limit is 1MB).
    pub max_message_size: usize,

    /// Log level for stderr diagnostics.
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_message_size: CHROME_MESSAGE_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Load configuration from a file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (JSON or TOML)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&content)?
        } else {
            // Default to JSON
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Resolve the effective tracing level.
    ///
    /// An explicit CLI value wins; otherwise the file-configured level
    /// applies. Unrecognized names fall back to `info`.
    pub fn resolve_log_level(&self, cli_override: Option<&str>) -> tracing::Level {
        let name = cli_override.unwrap_or(&self.log_level);
        match name.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_message_size == 0 {
            return Err(anyhow::anyhow!("max_message_size must be greater than 0"));
        }

        if self.max_message_size > CHROME_MESSAGE_LIMIT {
            return Err(anyhow::anyhow!(
                "max_message_size cannot exceed Chrome's 1MB limit"
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
        let config = HostConfig::default();
        assert_eq!(config.max_message_size, 1_048_576);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = HostConfig::default();

        config.max_message_size = 0;
        assert!(config.validate().is_err());

        config.max_message_size = 2_000_000; // > 1MB
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_resolution() {
        let mut config = HostConfig::default();
        config.log_level = "debug".to_string();

        // The file-configured level applies when the CLI gives none.
        assert_eq!(config.resolve_log_level(None), tracing::Level::DEBUG);

        // An explicit CLI value wins over the file.
        assert_eq!(
            config.resolve_log_level(Some("error")),
            tracing::Level::ERROR
        );

        // Unrecognized names fall back to info.
        assert_eq!(config.resolve_log_level(Some("loud")), tracing::Level::INFO);
        config.log_level = "loud".to_string();
        assert_eq!(config.resolve_log_level(None), tracing::Level::INFO);
    }

    #[test]
    fn test_config_file_round_trip() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;

        let json_path = dir.path().join("host.json");
        std::fs::write(
            &json_path,
            r#"{"max_message_size": 65536, "log_level": "debug"}"#,
        )?;
        let config = HostConfig::from_file(&json_path)?;
        assert_eq!(config.max_message_size, 65536);
        assert_eq!(config.log_level, "debug");

        let toml_path = dir.path().join("host.toml");
        std::fs::write(&toml_path, "max_message_size = 1024\nlog_level = \"warn\"\n")?;
        let config = HostConfig::from_file(&toml_path)?;
        assert_eq!(config.max_message_size, 1024);
        assert_eq!(config.log_level, "warn");

        Ok(())
    }
}
