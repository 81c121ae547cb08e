//! Watch-and-regenerate loop.
//!
//! This module provides:
//! - Directory watching using notify-rs
//! - A debounced, single-flight controller state machine
//! - Pipeline runners (child process or in-process)
//! - The async service that drives them and triggers client reloads

mod controller;
mod events;
mod runner;
mod service;
#[allow(clippy::module_inception)]
mod watcher;

pub use controller::{Action, RunOutcome, RunState, WatchController};
pub use events::FileEvent;
pub use runner::{InProcessRunner, PipelineRunner, SubprocessRunner};
pub use service::WatchService;
pub use watcher::FileWatcher;
