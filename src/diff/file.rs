use serde::Serialize;
use std::fmt;
use std::ops::Deref;

use super::line::Line;
use crate::image::is_image_file;

/// Presentation role of a [`Group`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// A lone hunk header
    Header,
    /// A run of unchanged lines
    Context,
    /// A run of added and removed lines
    Change,
}

/// Consecutive lines that are presented together.
///
/// Never empty: a group is created from its first line. Dereferences to
/// `[Line]`, so `group[0]` and `group.len()` work as on a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Group {
    lines: Vec<Line>,
}

impl Group {
    pub fn new(first: Line) -> Self {
        Self { lines: vec![first] }
    }

    pub fn kind(&self) -> GroupKind {
        match self.lines.first() {
            Some(Line::Header { .. }) => GroupKind::Header,
            Some(line) if line.is_change() => GroupKind::Change,
            _ => GroupKind::Context,
        }
    }

    /// Whether `line` continues this group's run.
    ///
    /// Headers always stand alone; context lines join context runs; added and
    /// removed lines join change runs in any interleaving.
    pub fn accepts(&self, line: &Line) -> bool {
        match (self.kind(), line) {
            (GroupKind::Header, _) | (_, Line::Header { .. }) => false,
            (GroupKind::Context, Line::Context { .. }) => true,
            (GroupKind::Change, line) => line.is_change(),
            (GroupKind::Context, _) => false,
        }
    }

    pub(crate) fn push(&mut self, line: Line) {
        self.lines.push(line);
    }
}

impl Deref for Group {
    type Target = [Line];

    fn deref(&self) -> &[Line] {
        &self.lines
    }
}

/// All groups for a single file of a patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    /// Target path from the file header (`Index:` wins over the git headers)
    pub name: String,
    pub groups: Vec<Group>,
}

impl FileDiff {
    /// Whether a viewer should compare this file as an image
    pub fn is_image(&self) -> bool {
        is_image_file(&self.name)
    }

    pub fn hunk_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|group| group.kind() == GroupKind::Header)
            .count()
    }

    /// All lines in source order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.groups.iter().flat_map(|group| group.iter())
    }
}

/// Text view of one file: each group is separated by a blank line and every
/// content line is prefixed with its marker and line number.
///
/// ```text
/// example.cc:
///   @@ -1,2 +1,1 @@ Context 1
///
///    1 | A line of text
///
///   -2 | Example line 1
/// ```
impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;

        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for line in group.iter() {
                write_line(f, line)?;
            }
        }

        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, line: &Line) -> fmt::Result {
    match line {
        Line::Header {
            text,
            context,
            old,
            new,
        } => {
            write!(f, "  @@ -{} +{} @@", old, new)?;
            if !text.is_empty() {
                write!(f, " {}", text)?;
            }
            if *context {
                write!(f, " [expand]")?;
            }
            writeln!(f)
        }
        Line::Context { text, new_line, .. } => writeln!(f, "   {} | {}", new_line, text),
        Line::Add { text, new_line } => writeln!(f, "  +{} | {}", new_line, text),
        Line::Remove { text, old_line } => writeln!(f, "  -{} | {}", old_line, text),
    }
}

/// Format several files, separated by blank lines
pub fn format_files(files: &[FileDiff]) -> String {
    files
        .iter()
        .map(FileDiff::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
