use error_set::error_set;
use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, u32 as number},
    combinator::opt,
    sequence::{delimited, preceded, separated_pair},
};
use serde::Serialize;
use std::fmt;

use super::line::Line;

error_set! {
    /// Errors from parsing a `@@ -a,b +c,d @@` hunk header
    HeaderError := {
        /// Line does not start with the `@@ ` marker
        #[display("Not a hunk header: '{line}'")]
        NotAHeader { line: String },
        /// Marker present but the ranges could not be read
        #[display("Malformed hunk ranges in '{line}'")]
        InvalidRange { line: String },
    }
}

/// One side of a hunk header: `start,count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HunkRange {
    pub start: u32,
    /// Number of lines covered. An omitted count means 1.
    pub count: u32,
}

impl fmt::Display for HunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.count)
    }
}

/// A parsed hunk header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub old: HunkRange,
    pub new: HunkRange,
    /// Whatever follows the closing `@@`, leading whitespace removed
    pub description: String,
}

impl HunkHeader {
    /// Parse a hunk header line.
    ///
    /// # Examples
    ///
    /// ```
    /// use patch_groups::HunkHeader;
    ///
    /// let header = HunkHeader::parse("@@ -4,2 +3 @@ fn main()").unwrap();
    /// assert_eq!((header.old.start, header.old.count), (4, 2));
    /// assert_eq!((header.new.start, header.new.count), (3, 1));
    /// assert_eq!(header.description, "fn main()");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::NotAHeader`] when the `@@ ` marker is missing and
    /// [`HeaderError::InvalidRange`] when the ranges or closing marker are malformed.
    pub fn parse(line: &str) -> Result<Self, HeaderError> {
        if !line.starts_with("@@ ") {
            return Err(HeaderError::NotAHeader {
                line: line.to_string(),
            });
        }

        let (rest, (old, new)) = ranges(line).map_err(|_| HeaderError::InvalidRange {
            line: line.to_string(),
        })?;

        Ok(HunkHeader {
            old,
            new,
            description: rest.trim_start().to_string(),
        })
    }

    /// The new side is empty: everything in this hunk was removed
    pub fn is_file_deletion(&self) -> bool {
        self.new.count == 0
    }

    /// Text shown for the header line
    pub fn text(&self) -> String {
        if self.description.is_empty() && self.is_file_deletion() {
            "File deleted".to_string()
        } else {
            self.description.clone()
        }
    }
}

/// `start` or `start,count`
fn range(input: &str) -> IResult<&str, HunkRange> {
    (number, opt(preceded(char(','), number)))
        .map(|(start, count)| HunkRange {
            start,
            count: count.unwrap_or(1),
        })
        .parse(input)
}

/// `@@ -start,count +start,count @@`, leaving the description unconsumed
fn ranges(input: &str) -> IResult<&str, (HunkRange, HunkRange)> {
    delimited(
        tag("@@ -"),
        separated_pair(range, tag(" +"), range),
        tag(" @@"),
    )
    .parse(input)
}

/// Position inside the hunk currently being read.
///
/// Hands out line numbers for content lines and tracks how many lines the
/// header announced are still outstanding on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkCursor {
    old_line: u32,
    new_line: u32,
    old_remaining: u32,
    new_remaining: u32,
}

impl HunkCursor {
    pub fn new(header: &HunkHeader) -> Self {
        Self {
            old_line: header.old.start,
            new_line: header.new.start,
            old_remaining: header.old.count,
            new_remaining: header.new.count,
        }
    }

    /// Every line announced by the header has been seen
    pub fn is_complete(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }

    pub fn context(&mut self, text: &str) -> Line {
        let line = Line::Context {
            text: text.to_string(),
            old_line: self.old_line,
            new_line: self.new_line,
        };
        self.advance_old();
        self.advance_new();
        line
    }

    pub fn remove(&mut self, text: &str) -> Line {
        let line = Line::Remove {
            text: text.to_string(),
            old_line: self.old_line,
        };
        self.advance_old();
        line
    }

    pub fn add(&mut self, text: &str) -> Line {
        let line = Line::Add {
            text: text.to_string(),
            new_line: self.new_line,
        };
        self.advance_new();
        line
    }

    fn advance_old(&mut self) {
        self.old_line = self.old_line.saturating_add(1);
        self.old_remaining = self.old_remaining.saturating_sub(1);
    }

    fn advance_new(&mut self) {
        self.new_line = self.new_line.saturating_add(1);
        self.new_remaining = self.new_remaining.saturating_sub(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn parse_full_header() {
        let header = HunkHeader::parse("@@ -1,2 +1,1 @@ Context 1").unwrap();
        assert_eq!(
            header,
            HunkHeader {
                old: HunkRange { start: 1, count: 2 },
                new: HunkRange { start: 1, count: 1 },
                description: "Context 1".to_string(),
            }
        );
    }

    #[test]
    fn parse_header_without_counts() {
        let header = HunkHeader::parse("@@ -15 +14,0 @@").unwrap();
        assert_eq!(header.old, HunkRange { start: 15, count: 1 });
        assert_eq!(header.new, HunkRange { start: 14, count: 0 });
        assert_eq!(header.description, "");
    }

    #[test]
    fn description_keeps_inner_whitespace() {
        let header = HunkHeader::parse("@@ -3,7 +3,8 @@   impl  Foo {").unwrap();
        assert_eq!(header.description, "impl  Foo {");
    }

    #[test]
    fn description_directly_after_marker() {
        let header = HunkHeader::parse("@@ -3,7 +3,8 @@@@").unwrap();
        assert_eq!(header.description, "@@");
    }

    #[test]
    fn deletion_without_description_is_labelled() {
        let header = HunkHeader::parse("@@ -1,3 +0,0 @@").unwrap();
        assert!(header.is_file_deletion());
        assert_eq!(header.text(), "File deleted");
    }

    #[test]
    fn deletion_keeps_its_own_description() {
        let header = HunkHeader::parse("@@ -1,1 +0,0 @@ File deleted").unwrap();
        assert_eq!(header.text(), "File deleted");

        let header = HunkHeader::parse("@@ -10,2 +9,0 @@ struct Config {").unwrap();
        assert_eq!(header.text(), "struct Config {");
    }

    #[test]
    fn rejects_non_header() {
        let result = HunkHeader::parse("+@@ -1 +1 @@");
        assert!(matches!(result, Err(HeaderError::NotAHeader { .. })));
    }

    #[test]
    fn rejects_combined_diff_header() {
        let result = HunkHeader::parse("@@@ -1,2 -1,2 +1,3 @@@");
        assert!(matches!(result, Err(HeaderError::NotAHeader { .. })));
    }

    #[test]
    fn rejects_malformed_ranges() {
        for line in ["@@ -a,b +c,d @@", "@@ -1,2 @@", "@@ -1,2 +3,4", "@@ 1,2 +3,4 @@"] {
            let result = HunkHeader::parse(line);
            assert!(
                matches!(result, Err(HeaderError::InvalidRange { .. })),
                "{line} should be rejected"
            );
        }
    }

    #[test]
    fn cursor_numbers_lines_per_side() {
        let header = HunkHeader::parse("@@ -10,3 +20,3 @@").unwrap();
        let mut cursor = HunkCursor::new(&header);

        assert_eq!(
            cursor.context("a"),
            Line::Context {
                text: "a".to_string(),
                old_line: 10,
                new_line: 20
            }
        );
        assert_eq!(
            cursor.remove("b"),
            Line::Remove {
                text: "b".to_string(),
                old_line: 11
            }
        );
        assert_eq!(
            cursor.add("c"),
            Line::Add {
                text: "c".to_string(),
                new_line: 21
            }
        );
        assert!(!cursor.is_complete());

        cursor.context("d");
        assert!(cursor.is_complete());
    }

    #[test]
    fn cursor_does_not_underflow_past_announced_counts() {
        let header = HunkHeader::parse("@@ -1 +0,0 @@").unwrap();
        let mut cursor = HunkCursor::new(&header);
        cursor.remove("gone");
        assert!(cursor.is_complete());

        cursor.context("");
        assert!(cursor.is_complete());
    }
}
