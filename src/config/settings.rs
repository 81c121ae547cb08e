//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Source file extension the pipeline documents.
pub const SOURCE_EXTENSION: &str = "java";

/// Debounce window for coalescing editor save bursts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Longest debounce window accepted by `validate`.
const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

/// Main configuration for refsync.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Java source tree.
    pub source_root: PathBuf,

    /// Root of the generated reference content.
    pub output_root: PathBuf,

    /// Extension (without the dot) of files to document.
    pub extension: String,

    /// Debounce window for file change bursts.
    pub debounce: Duration,

    /// Host address for the dev server.
    pub host: String,

    /// Port for the dev server.
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("../src/main/java"),
            output_root: PathBuf::from("src/content/reference"),
            extension: SOURCE_EXTENSION.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            host: "127.0.0.1".to_string(),
            port: 4322,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::config("port cannot be 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(Error::config(
                "extension must be non-empty and given without a leading dot",
            ));
        }

        if self.debounce.is_zero() {
            return Err(Error::config("debounce cannot be 0"));
        }

        if self.debounce > MAX_DEBOUNCE {
            return Err(Error::config("debounce cannot exceed 10s"));
        }

        if self.host.is_empty() {
            return Err(Error::config("host cannot be empty"));
        }

        // Writing into the source tree would feed the watcher its own output.
        if self.source_root == self.output_root {
            return Err(Error::config(
                "source root and output root must be different directories",
            ));
        }

        Ok(())
    }

    /// Get the dev server address as a string.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
