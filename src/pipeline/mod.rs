//! Reference generation pipeline.
//!
//! This module provides:
//! - Source discovery under a root directory
//! - A synchronous, file-by-file run that extracts and writes documents

mod discovery;
mod orchestrator;

pub use discovery::{discover_sources, has_extension};
pub use orchestrator::{run_pipeline, PipelineConfig, PipelineReport};
