pub mod classify;
pub mod file;
pub mod full;
pub mod hunk;
pub mod line;

pub use file::{FileDiff, Group, GroupKind, format_files};
pub use full::{DiffParser, ParseState};
pub use hunk::{HeaderError, HunkHeader, HunkRange};
pub use line::{Line, LineKind};

/// Parse a complete patch into file diffs
pub fn parse(text: &str) -> Vec<FileDiff> {
    DiffParser::new(text).parse()
}
