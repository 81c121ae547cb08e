//! File system event types and handling.

#![allow(clippy::missing_const_for_fn)]

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind, RenameMode};

use crate::pipeline::has_extension;

/// File system event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// File was created or modified.
    Modified(PathBuf),
    /// File was deleted.
    Deleted(PathBuf),
    /// File was renamed from old path to new path.
    Renamed { from: PathBuf, to: PathBuf },
}

impl FileEvent {
    /// Get the primary path associated with this event.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Modified(p) | Self::Deleted(p) => p,
            Self::Renamed { to, .. } => to,
        }
    }

    /// Whether any path touched by this event has the given extension.
    ///
    /// Renames count if either side matches, so both atomic saves
    /// (temp file renamed over the source) and renames away are seen.
    #[must_use]
    pub fn touches_extension(&self, extension: &str) -> bool {
        match self {
            Self::Modified(p) | Self::Deleted(p) => has_extension(p, extension),
            Self::Renamed { from, to } => {
                has_extension(from, extension) || has_extension(to, extension)
            }
        }
    }

    /// Convert a raw notify event. Access and unclassified events yield nothing.
    #[must_use]
    pub fn from_notify(event: &notify::Event) -> Vec<Self> {
        let paths = || event.paths.iter().cloned();
        match &event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
                vec![Self::Renamed {
                    from: event.paths[0].clone(),
                    to: event.paths[1].clone(),
                }]
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => {
                paths().map(Self::Deleted).collect()
            }
            EventKind::Create(_) | EventKind::Modify(_) => paths().map(Self::Modified).collect(),
            _ => Vec::new(),
        }
    }
}
