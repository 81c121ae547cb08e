//! File system watcher using notify-rs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::events::FileEvent;
use crate::error::WatcherError;
use crate::Result;

/// File system watcher forwarding [`FileEvent`]s to a channel.
///
/// Events are forwarded raw; debouncing is the controller's job.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched_dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl FileWatcher {
    /// Create a watcher that sends events to `event_tx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watcher cannot be created.
    pub fn new(event_tx: mpsc::Sender<FileEvent>) -> Result<Self> {
        let watched_dirs = Arc::new(Mutex::new(Vec::new()));
        let watched_dirs_clone = Arc::clone(&watched_dirs);

        let watcher = notify::recommended_watcher(
            move |result: std::result::Result<notify::Event, notify::Error>| match result {
                Ok(event) => {
                    for file_event in FileEvent::from_notify(&event) {
                        if !is_under_watched(&watched_dirs_clone.lock(), file_event.path()) {
                            continue;
                        }
                        if event_tx.blocking_send(file_event).is_err() {
                            tracing::trace!("File event receiver dropped");
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Watch error: {:?}", e);
                }
            },
        )
        .map_err(|e| WatcherError::WatchFailed {
            path: "init".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            watcher,
            watched_dirs,
        })
    }

    /// Add a directory to watch, recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be watched.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let requested = path.as_ref();

        if !requested.is_dir() {
            return Err(WatcherError::WatchFailed {
                path: requested.display().to_string(),
                reason: "directory does not exist".to_string(),
            }
            .into());
        }

        // notify reports absolute paths.
        let path = requested
            .canonicalize()
            .map_err(|e| WatcherError::WatchFailed {
                path: requested.display().to_string(),
                reason: e.to_string(),
            })?;

        self.watcher
            .watch(&path, RecursiveMode::Recursive)
            .map_err(|e| WatcherError::WatchFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.watched_dirs.lock().push(path.clone());
        tracing::info!(path = %path.display(), "Watching directory");

        Ok(())
    }

    #[cfg(test)]
    fn watched_dirs(&self) -> Vec<PathBuf> {
        self.watched_dirs.lock().clone()
    }
}

/// Check if a path is under any watched directory.
fn is_under_watched(watched: &[PathBuf], path: &Path) -> bool {
    watched.iter().any(|dir| path.starts_with(dir))
}
