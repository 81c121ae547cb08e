//! Error types and Result aliases for refsync.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.
//!
//! A file without a recognizable type header is not an error: the
//! extractor returns `None` for it and the pipeline skips it.

use thiserror::Error;

/// Result type alias using refsync's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for refsync operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reference generation error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// File watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// Dev server error.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Reference generation errors.
///
/// `OutputRoot` is fatal to a run. The per-file variants are caught by the
/// orchestrator, logged, and counted as failures.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The output root could not be created.
    #[error("cannot create output root '{path}': {reason}")]
    OutputRoot { path: String, reason: String },

    /// A source file could not be read.
    #[error("failed to read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    /// A reference document could not be written.
    #[error("failed to write '{path}': {reason}")]
    WriteFailed { path: String, reason: String },
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Failed to watch path.
    #[error("failed to watch path '{path}': {reason}")]
    WatchFailed { path: String, reason: String },

    /// A pipeline run could not be started or did not succeed.
    #[error("pipeline run failed: {0}")]
    RunFailed(String),
}

/// Dev server errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind to {address}: {reason}")]
    BindFailed { address: String, reason: String },

    /// Request handling error.
    #[error("request error: {0}")]
    Request(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl PipelineError {
    /// Create a read failure for `path`.
    pub fn read_failed(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::ReadFailed {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a write failure for `path`.
    pub fn write_failed(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
