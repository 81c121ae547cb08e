//! Reference document emission.
//!
//! Turns an extracted [`SourceUnit`](crate::extract::SourceUnit) into a
//! front-matter-tagged Markdown document and decides where it lives in the
//! output tree.

mod markdown;
mod paths;

pub use markdown::{escape_markup, render_document};
pub use paths::{output_path, DOCUMENT_EXTENSION};
