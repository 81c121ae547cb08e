//! Discovery → extraction → emission over a whole source tree.

use std::fs;
use std::path::{Path, PathBuf};

use super::discovery::discover_sources;
use crate::config::{Config, SOURCE_EXTENSION};
use crate::emit::{output_path, render_document};
use crate::error::PipelineError;
use crate::extract::extract_source_unit;
use crate::Result;

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the source tree.
    pub source_root: PathBuf,
    /// Root of the generated reference tree.
    pub output_root: PathBuf,
    /// Extension of source files, without the dot.
    pub extension: String,
}

impl PipelineConfig {
    /// Pipeline over `source_root` writing to `output_root`, for `.java` files.
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            extension: SOURCE_EXTENSION.to_string(),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            source_root: config.source_root.clone(),
            output_root: config.output_root.clone(),
            extension: config.extension.clone(),
        }
    }
}

/// Outcome counts of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Source files found.
    pub discovered: usize,
    /// Documents written.
    pub generated: usize,
    /// Files without a type header.
    pub skipped: usize,
    /// Files that could not be read or whose document could not be written.
    pub failed: usize,
    /// Paths of the documents written, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Run the pipeline once.
///
/// Per-file failures are logged and counted, never propagated; the run
/// keeps going with the next file. Existing documents are overwritten and
/// documents of types that no longer exist are left in place.
///
/// # Errors
///
/// Returns [`PipelineError::OutputRoot`] if the output root cannot be
/// created. Nothing is written in that case.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    fs::create_dir_all(&config.output_root).map_err(|e| PipelineError::OutputRoot {
        path: config.output_root.display().to_string(),
        reason: e.to_string(),
    })?;

    let files = discover_sources(&config.source_root, &config.extension);
    let mut report = PipelineReport {
        discovered: files.len(),
        ..PipelineReport::default()
    };

    for file in &files {
        match process_file(file, &config.output_root) {
            Ok(Some(written)) => {
                tracing::debug!(source = %file.display(), output = %written.display(), "Wrote reference page");
                report.generated += 1;
                report.outputs.push(written);
            }
            Ok(None) => {
                tracing::trace!(source = %file.display(), "No type header, skipping");
                report.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping file");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        discovered = report.discovered,
        generated = report.generated,
        skipped = report.skipped,
        failed = report.failed,
        "Reference generation complete"
    );

    Ok(report)
}

fn process_file(
    file: &Path,
    output_root: &Path,
) -> std::result::Result<Option<PathBuf>, PipelineError> {
    let text = fs::read_to_string(file).map_err(|e| PipelineError::read_failed(file, e))?;

    let Some(unit) = extract_source_unit(&text) else {
        return Ok(None);
    };

    let target = output_path(output_root, &unit);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::write_failed(parent, e))?;
    }
    fs::write(&target, render_document(&unit))
        .map_err(|e| PipelineError::write_failed(&target, e))?;

    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_pipeline_counts() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let out = tmp.path().join("out");
        write(&src, "a/A.java", b"package a;\npublic class A {}");
        write(&src, "a/package-info.java", b"/** Package docs. */\npackage a;");
        write(&src, "Bad.java", &[0xff, 0xfe, 0x00, 0x80]);

        let report = run_pipeline(&PipelineConfig::new(&src, &out)).unwrap();

        assert_eq!(report.discovered, 3);
        assert_eq!(report.generated, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.outputs, vec![out.join("a").join("A.md")]);
    }

    #[test]
    fn test_pipeline_write_failure_is_isolated() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let out = tmp.path().join("out");
        write(&src, "x/Blocked.java", b"package x.y;\nclass Blocked {}");
        write(&src, "z/Fine.java", b"package z;\nclass Fine {}");
        // A file where the package directory should go.
        write(&out, "x", b"not a directory");

        let report = run_pipeline(&PipelineConfig::new(&src, &out)).unwrap();

        assert_eq!(report.generated, 1);
        assert_eq!(report.failed, 1);
        assert!(out.join("z").join("Fine.md").is_file());
    }

    #[test]
    fn test_pipeline_output_root_uncreatable() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let err = run_pipeline(&PipelineConfig::new(tmp.path(), blocker.join("out"))).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Pipeline(PipelineError::OutputRoot { .. })
        ));
    }

    #[test]
    fn test_pipeline_missing_source_root() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let report = run_pipeline(&PipelineConfig::new(tmp.path().join("missing"), &out)).unwrap();
        assert_eq!(report, PipelineReport::default());
        assert!(out.is_dir());
    }

    #[test]
    fn test_pipeline_config_from_config() {
        let config = Config::default();
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.source_root, config.source_root);
        assert_eq!(pipeline.output_root, config.output_root);
        assert_eq!(pipeline.extension, "java");
    }
}
