//! Declaration extraction: one principal type plus its accessible methods.

use std::fmt;
use std::str::FromStr;

use super::comment::strip_doc_comment;
use super::patterns::{MEMBER, PACKAGE, TYPE_HEADER};

/// Kind of a top-level type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
}

impl TypeKind {
    /// Keyword as written in source and in reference front matter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "enum" => Ok(Self::Enum),
            "record" => Ok(Self::Record),
            other => Err(format!("unknown type kind '{other}'")),
        }
    }
}

/// An accessible method found after the type header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSignature {
    /// Method identifier.
    pub name: String,
    /// Normalized doc comment, empty when undocumented.
    pub summary: String,
    /// Parameter list exactly as written, trimmed.
    pub parameter_text: String,
}

/// The principal type declared by one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Dotted package, empty for the default package.
    pub package_id: String,
    pub kind: TypeKind,
    pub name: String,
    /// Normalized doc comment of the type, possibly empty.
    pub summary: String,
    /// Members in order of appearance.
    pub members: Vec<MemberSignature>,
}

impl SourceUnit {
    /// `package.Name`, or just `Name` in the default package.
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        if self.package_id.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package_id, self.name)
        }
    }
}

/// Extract the first type declaration of `text` and the methods after it.
///
/// Returns `None` when no type header is found. Only the first header is
/// captured even if the file declares several types.
#[must_use]
pub fn extract_source_unit(text: &str) -> Option<SourceUnit> {
    let package_id = PACKAGE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    let header = TYPE_HEADER.captures(text)?;
    let kind = header[2].parse().ok()?;
    let name = header[3].to_string();
    let summary = header
        .get(1)
        .map(|doc| strip_doc_comment(doc.as_str()))
        .unwrap_or_default();

    let rest = &text[header.get(0)?.end()..];
    let members = MEMBER
        .captures_iter(rest)
        .map(|caps| MemberSignature {
            name: caps[2].to_string(),
            summary: caps
                .get(1)
                .map(|doc| strip_doc_comment(doc.as_str()))
                .unwrap_or_default(),
            parameter_text: caps[3].trim().to_string(),
        })
        .collect();

    Some(SourceUnit {
        package_id,
        kind,
        name,
        summary,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALC: &str = r"package a.b;

import java.util.List;

/**
 * Computes totals.
 */
public class Calc {
    private int base;

    /**
     * Adds two numbers.
     */
    public int sum(int x, int y) {
        return x + y;
    }
}
";

    #[test]
    fn test_extract_calc() {
        let unit = extract_source_unit(CALC).unwrap();
        assert_eq!(unit.package_id, "a.b");
        assert_eq!(unit.kind, TypeKind::Class);
        assert_eq!(unit.name, "Calc");
        assert_eq!(unit.fully_qualified_name(), "a.b.Calc");
        assert_eq!(unit.summary, "Computes totals.");
        assert_eq!(
            unit.members,
            vec![MemberSignature {
                name: "sum".to_string(),
                summary: "Adds two numbers.".to_string(),
                parameter_text: "int x, int y".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_header_returns_none() {
        assert!(extract_source_unit("package a;\n// nothing here\n").is_none());
        assert!(extract_source_unit("").is_none());
    }

    #[test]
    fn test_default_package() {
        let unit = extract_source_unit("enum Color { RED, GREEN }").unwrap();
        assert_eq!(unit.package_id, "");
        assert_eq!(unit.kind, TypeKind::Enum);
        assert_eq!(unit.fully_qualified_name(), "Color");
        assert!(unit.summary.is_empty());
        assert!(unit.members.is_empty());
    }

    #[test]
    fn test_members_in_file_order() {
        let text = r"package p;
public final class Ops {
    public void first() {}
    protected String second(String s) { return s; }
    private void hidden() {}
    /** Third. */
    public static <T> List<T> third(T[] items) throws Exception {
        return null;
    }
}
";
        let unit = extract_source_unit(text).unwrap();
        let names: Vec<_> = unit.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(unit.members[0].summary, "");
        assert_eq!(unit.members[2].summary, "Third.");
        assert_eq!(unit.members[2].parameter_text, "T[] items");
    }

    #[test]
    fn test_only_first_type_captured() {
        let text = "class First {}\nclass Second { public void m() {} }";
        let unit = extract_source_unit(text).unwrap();
        assert_eq!(unit.name, "First");
        // Methods of later types still land on the first unit.
        assert_eq!(unit.members.len(), 1);
    }

    #[test]
    fn test_nearest_doc_comment_wins() {
        let text = "/** Stale. */\n/** Fresh. */\npublic record Point(int x, int y) {}";
        let unit = extract_source_unit(text).unwrap();
        assert_eq!(unit.kind, TypeKind::Record);
        assert_eq!(unit.summary, "Fresh.");
        assert!(unit.members.is_empty());
    }

    #[test]
    fn test_annotated_member_keeps_doc() {
        let text = r"public interface Operator {
    /** Applies the operator. */
    @Override
    public boolean apply(Object a, Object b) {
        return false;
    }
}";
        let unit = extract_source_unit(text).unwrap();
        assert_eq!(unit.members.len(), 1);
        assert_eq!(unit.members[0].summary, "Applies the operator.");
        assert_eq!(unit.members[0].parameter_text, "Object a, Object b");
    }

    #[test]
    fn test_type_kind_round_trip_and_error() {
        for kind in [
            TypeKind::Class,
            TypeKind::Interface,
            TypeKind::Enum,
            TypeKind::Record,
        ] {
            assert_eq!(kind.as_str().parse::<TypeKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!("struct".parse::<TypeKind>().is_err());
    }
}
