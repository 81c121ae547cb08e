//! Source file discovery.
//!
//! Walks the source root and collects every file with the configured
//! extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find all files under `root` whose extension is `extension`.
///
/// Paths are absolute and sorted by the walk order with entries sorted by
/// file name, so two runs over the same tree see the same sequence. A
/// missing root produces an empty list rather than an error.
#[must_use]
pub fn discover_sources(root: &Path, extension: &str) -> Vec<PathBuf> {
    let root = match root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "Source root unavailable");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    let mut errors = 0_u64;

    for entry in WalkDir::new(&root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error walking source tree");
                errors += 1;
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        found = files.len(),
        errors,
        "Source discovery complete"
    );

    files
}

/// Check whether `path` ends in `.<extension>`.
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}
