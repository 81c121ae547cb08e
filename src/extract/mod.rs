//! Heuristic extraction of documented declarations from Java source.
//!
//! This is pattern matching over raw text, not a parse. Each file yields at
//! most one [`SourceUnit`]; files without a recognizable type header yield
//! nothing and are skipped by the pipeline.

mod comment;
mod declaration;
mod patterns;

pub use comment::strip_doc_comment;
pub use declaration::{extract_source_unit, MemberSignature, SourceUnit, TypeKind};
