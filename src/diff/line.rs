use serde::Serialize;
use std::fmt;

use super::hunk::HunkRange;

/// What role a [`Line`] plays in the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Header,
    Context,
    Add,
    Remove,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineKind::Header => "header",
            LineKind::Context => "context",
            LineKind::Add => "add",
            LineKind::Remove => "remove",
        })
    }
}

/// A single classified diff line.
///
/// `text` never includes the one-character diff marker. For headers it is the
/// description that followed the `@@ … @@` ranges.
///
/// Serializes with a `type` tag, e.g. `{"type":"add","text":"x","new_line":4}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Line {
    /// Hunk header
    Header {
        text: String,
        /// Lines above this hunk were skipped and can be offered for expansion
        context: bool,
        old: HunkRange,
        new: HunkRange,
    },
    /// Unchanged line, present on both sides
    Context {
        text: String,
        old_line: u32,
        new_line: u32,
    },
    /// Line present only in the new version
    Add { text: String, new_line: u32 },
    /// Line present only in the old version
    Remove { text: String, old_line: u32 },
}

impl Line {
    pub fn kind(&self) -> LineKind {
        match self {
            Line::Header { .. } => LineKind::Header,
            Line::Context { .. } => LineKind::Context,
            Line::Add { .. } => LineKind::Add,
            Line::Remove { .. } => LineKind::Remove,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Line::Header { text, .. }
            | Line::Context { text, .. }
            | Line::Add { text, .. }
            | Line::Remove { text, .. } => text,
        }
    }

    /// The header `context` flag; `None` for every other kind
    pub fn context(&self) -> Option<bool> {
        match self {
            Line::Header { context, .. } => Some(*context),
            _ => None,
        }
    }

    /// Added or removed
    pub fn is_change(&self) -> bool {
        matches!(self, Line::Add { .. } | Line::Remove { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn header_exposes_context_flag() {
        let line = Line::Header {
            text: "Context 2".to_string(),
            context: true,
            old: HunkRange { start: 4, count: 2 },
            new: HunkRange { start: 3, count: 1 },
        };
        assert_eq!(line.kind(), LineKind::Header);
        assert_eq!(line.text(), "Context 2");
        assert_eq!(line.context(), Some(true));
        assert!(!line.is_change());
    }

    #[test]
    fn content_lines_have_no_context_flag() {
        let lines = [
            Line::Context {
                text: "a".to_string(),
                old_line: 1,
                new_line: 1,
            },
            Line::Add {
                text: "b".to_string(),
                new_line: 2,
            },
            Line::Remove {
                text: "c".to_string(),
                old_line: 2,
            },
        ];
        for line in &lines {
            assert_eq!(line.context(), None);
        }
        assert_eq!(
            lines.iter().map(Line::kind).collect::<Vec<_>>(),
            vec![LineKind::Context, LineKind::Add, LineKind::Remove]
        );
        assert_eq!(
            lines.iter().map(Line::is_change).collect::<Vec<_>>(),
            vec![false, true, true]
        );
    }

    #[test]
    fn kind_names_match_serialized_tag() {
        assert_eq!(LineKind::Header.to_string(), "header");
        assert_eq!(LineKind::Context.to_string(), "context");
        assert_eq!(LineKind::Add.to_string(), "add");
        assert_eq!(LineKind::Remove.to_string(), "remove");
    }

    #[test]
    fn serializes_with_type_tag() {
        let line = Line::Remove {
            text: "Example line 1".to_string(),
            old_line: 2,
        };
        insta::assert_json_snapshot!(line, @r#"
        {
          "type": "remove",
          "text": "Example line 1",
          "old_line": 2
        }
        "#);
    }
}
