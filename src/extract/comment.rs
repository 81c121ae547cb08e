//! Doc comment normalization.

/// Strip doc comment markup, leaving the prose.
///
/// Removes the `/**` and `*/` delimiters when present, strips a leading
/// `*` (and one following space) from each line, then trims the block.
/// Text without comment markers comes back unchanged apart from the outer
/// trim, so the function is idempotent.
#[must_use]
pub fn strip_doc_comment(raw: &str) -> String {
    let mut body = raw.trim();
    if let Some(rest) = body.strip_prefix("/**") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("*/") {
        body = rest.trim_end_matches('*');
    }

    body.lines()
        .map(strip_line_marker)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_line_marker(line: &str) -> &str {
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}
