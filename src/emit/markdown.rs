//! Markdown rendering of a [`SourceUnit`].

use crate::extract::{MemberSignature, SourceUnit};

/// Render the reference document for `unit`.
///
/// Output is a pure function of the input: front matter keys always appear
/// in the order `title`, `fqcn`, `package`, `kind`, and whitespace is fixed,
/// so regenerating unchanged sources produces byte-identical files.
#[must_use]
pub fn render_document(unit: &SourceUnit) -> String {
    let mut doc = String::new();

    doc.push_str(&format!(
        "---\ntitle: {}\nfqcn: {}\npackage: {}\nkind: {}\n---\n\n",
        unit.name,
        unit.fully_qualified_name(),
        front_matter_value(&unit.package_id),
        unit.kind
    ));

    if !unit.summary.is_empty() {
        doc.push_str(&unit.summary);
        doc.push_str("\n\n");
    }

    doc.push_str(&format!("## {} {}\n\n", unit.kind, unit.name));

    if !unit.members.is_empty() {
        doc.push_str("### Methods\n\n");
        for member in &unit.members {
            render_member(&mut doc, member);
        }
    }

    doc
}

fn render_member(doc: &mut String, member: &MemberSignature) {
    doc.push_str(&format!(
        "- `{}({})`\n",
        member.name,
        escape_markup(&member.parameter_text)
    ));

    if member.summary.is_empty() {
        return;
    }

    // Continuation lines are indented to stay inside the sub-bullet.
    let mut lines = member.summary.lines();
    if let Some(first) = lines.next() {
        doc.push_str(&format!("  - {first}\n"));
    }
    for line in lines {
        if line.trim().is_empty() {
            doc.push('\n');
        } else {
            doc.push_str(&format!("    {line}\n"));
        }
    }
}

/// Escape angle brackets so generic types are not read as HTML tags.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// An empty YAML value parses as null; quote it so the field stays a string.
fn front_matter_value(value: &str) -> &str {
    if value.is_empty() {
        "\"\""
    } else {
        value
    }
}
