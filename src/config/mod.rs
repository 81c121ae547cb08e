//! Configuration management for refsync.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables
//! - Built-in defaults (lowest priority)

mod settings;

pub use settings::{Config, DEFAULT_DEBOUNCE, SOURCE_EXTENSION};
