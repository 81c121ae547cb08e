//! Compiled patterns for locating doc comments and declarations.
//!
//! These are loose: they match declarations by shape, not by
//! grammar, and accept that nested types, generic commas and annotation
//! arguments containing parentheses can produce spurious or missed matches.

use once_cell::sync::Lazy;
use regex::Regex;

// A `/** ... */` block whose body cannot contain `*/`, so a match never
// spans two comments. Capture 1 is the body without delimiters.
const DOC_COMMENT: &str = r"/\*\*((?:[^*]|\*+[^*/])*)\*+/";

// Zero or more annotations such as `@Override` or `@Deprecated(since = "2")`.
const ANNOTATIONS: &str = r"(?:@\w+(?:\.\w+)*(?:\([^)]*\))?\s+)*";

const TYPE_MODIFIERS: &str =
    r"(?:(?:public|protected|private|static|final|abstract|sealed|non-sealed|strictfp)\s+)*";

const MEMBER_MODIFIERS: &str =
    r"(?:(?:static|final|abstract|synchronized|native|default|strictfp)\s+)*";

/// `package a.b.c;` at the start of a line. Capture 1 is the namespace.
pub static PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").expect("package pattern is valid")
});

/// Type header. Captures: 1 doc body, 2 kind keyword, 3 type name.
pub static TYPE_HEADER: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?:{DOC_COMMENT}\s*)?{ANNOTATIONS}{TYPE_MODIFIERS}\b(class|interface|enum|record)\s+(\w+)"
    );
    Regex::new(&pattern).expect("type header pattern is valid")
});

/// Accessible method with a body. Captures: 1 doc body, 2 name, 3 parameters.
pub static MEMBER: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?:{DOC_COMMENT}\s*)?{ANNOTATIONS}\b(?:public|protected)\s+{MEMBER_MODIFIERS}(?:<[^>]*>\s*)?[\w<>\[\]]+\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[^{{]+)?\{{"
    );
    Regex::new(&pattern).expect("member pattern is valid")
});
