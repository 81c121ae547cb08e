//! Output path derivation.

use std::path::{Path, PathBuf};

use crate::extract::SourceUnit;

/// Extension of generated reference documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// `output_root/<package as directories>/<Name>.md`.
///
/// Distinct `(package, name)` pairs always map to distinct paths.
#[must_use]
pub fn output_path(output_root: &Path, unit: &SourceUnit) -> PathBuf {
    let mut path = output_root.to_path_buf();
    for segment in unit.package_id.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{DOCUMENT_EXTENSION}", unit.name));
    path
}
