//! refsync
//!
//! Generates Markdown API reference pages from Java sources and keeps them
//! current while the source tree is edited.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod server;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
