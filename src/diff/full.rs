//! Multi-file patch parsing.
//!
//! The parser is an explicit state machine. [`DiffParser::step`] takes the
//! current [`ParseState`] and one raw line and returns the next state plus,
//! when a file section ends, the finished [`FileDiff`].

use super::classify::{FileHeaderLine, RawLine, Scope, classify};
use super::file::{FileDiff, Group};
use super::hunk::{HunkCursor, HunkHeader};
use super::line::Line;

/// Where a file name came from. Later variants take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
enum NameSource {
    #[default]
    None,
    OldPath,
    Git,
    NewPath,
    Index,
}

/// A file section being assembled
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileBuilder {
    name: String,
    source: NameSource,
    git_line_seen: bool,
    hunks: usize,
    groups: Vec<Group>,
}

impl FileBuilder {
    fn from_header(line: FileHeaderLine<'_>) -> Self {
        let mut file = FileBuilder::default();
        file.describe(line);
        file
    }

    /// Fold a file header line into this section
    fn describe(&mut self, line: FileHeaderLine<'_>) {
        match line {
            FileHeaderLine::Index(path) => self.offer_name(Some(path), NameSource::Index),
            FileHeaderLine::Git(path) => {
                self.git_line_seen = true;
                self.offer_name(path, NameSource::Git);
            }
            FileHeaderLine::OldPath(path) => self.offer_name(path, NameSource::OldPath),
            FileHeaderLine::NewPath(path) => self.offer_name(path, NameSource::NewPath),
        }
    }

    fn offer_name(&mut self, path: Option<&str>, source: NameSource) {
        if let Some(path) = path.filter(|_| source >= self.source) {
            self.name = path.to_string();
            self.source = source;
        }
    }

    /// A `diff --git` line right after `Index:` still describes this file
    fn continues_with_git_line(&self) -> bool {
        self.source == NameSource::Index && !self.git_line_seen && self.hunks == 0
    }

    fn open_hunk(&mut self, header: HunkHeader) -> HunkCursor {
        let cursor = HunkCursor::new(&header);
        let context = self.hunks > 0 && !header.is_file_deletion();
        self.groups.push(Group::new(Line::Header {
            text: header.text(),
            context,
            old: header.old,
            new: header.new,
        }));
        self.hunks += 1;
        cursor
    }

    fn push(&mut self, line: Line) {
        match self.groups.last_mut() {
            Some(group) if group.accepts(&line) => group.push(line),
            _ => self.groups.push(Group::new(line)),
        }
    }

    /// `None` when the section produced no groups
    fn finish(self) -> Option<FileDiff> {
        if self.groups.is_empty() {
            log::debug!("dropping file section '{}' without hunks", self.name);
            return None;
        }
        Some(FileDiff {
            name: self.name,
            groups: self.groups,
        })
    }
}

/// Parser state between two input lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    /// No file section open
    #[default]
    Idle,
    /// Reading the metadata block of a file section
    InFileHeader(FileBuilder),
    /// Reading the content lines of a hunk
    InHunk(FileBuilder, HunkCursor),
}

impl ParseState {
    fn scope(&self) -> Scope {
        match self {
            ParseState::Idle | ParseState::InFileHeader(_) => Scope::Preamble,
            ParseState::InHunk(_, cursor) => Scope::Hunk {
                complete: cursor.is_complete(),
            },
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ParseState::Idle => "Idle",
            ParseState::InFileHeader(_) => "InFileHeader",
            ParseState::InHunk(..) => "InHunk",
        }
    }

    /// Close the open file section, if any
    pub fn finish(self) -> Option<FileDiff> {
        match self {
            ParseState::Idle => None,
            ParseState::InFileHeader(file) | ParseState::InHunk(file, _) => file.finish(),
        }
    }
}

/// Parses unified diff text into per-file groups.
///
/// Parsing never fails: lines that do not fit the expected
/// `Index:`/`diff --git`/`---`/`+++`/`@@` layout are skipped. Callers that need
/// strict validation must do it themselves.
///
/// # Examples
///
/// ```
/// use patch_groups::{DiffParser, LineKind};
///
/// let text = "Index: example.cc\n\
///             --- a/example.cc\n\
///             +++ b/example.cc\n\
///             @@ -1,2 +1,2 @@ Context 1\n \
///             A line of text\n\
///             -Example line 1\n\
///             +Example line 2";
///
/// let files = DiffParser::new(text).parse();
/// assert_eq!(files.len(), 1);
/// assert_eq!(files[0].name, "example.cc");
/// assert_eq!(files[0].groups.len(), 3);
/// assert_eq!(files[0].groups[0][0].kind(), LineKind::Header);
/// assert_eq!(files[0].groups[2][1].text(), "Example line 2");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiffParser<'a> {
    text: &'a str,
}

impl<'a> DiffParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Parse every file section, in input order
    pub fn parse(&self) -> Vec<FileDiff> {
        let mut files = Vec::new();
        let mut state = ParseState::Idle;

        for raw in self.text.split('\n') {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let (next, finished) = Self::step(state, raw);
            files.extend(finished);
            state = next;
        }

        files.extend(state.finish());
        files
    }

    /// Advance the state machine by one raw line
    pub fn step(state: ParseState, raw: &str) -> (ParseState, Option<FileDiff>) {
        let from = state.name();
        let line = classify(raw, state.scope());
        let (next, finished) = Self::transition(state, line);
        log::trace!("{from} -> {}: {raw:?}", next.name());
        (next, finished)
    }

    fn transition(state: ParseState, line: RawLine<'_>) -> (ParseState, Option<FileDiff>) {
        match line {
            RawLine::FileHeader(header) => Self::file_header(state, header),
            RawLine::HunkHeader(header) => match state {
                ParseState::Idle => {
                    log::debug!("skipping hunk outside any file: {header:?}");
                    (ParseState::Idle, None)
                }
                ParseState::InFileHeader(mut file) | ParseState::InHunk(mut file, _) => {
                    let cursor = file.open_hunk(header);
                    (ParseState::InHunk(file, cursor), None)
                }
            },
            RawLine::Context(text) => Self::content(state, |cursor| cursor.context(text)),
            RawLine::Add(text) => Self::content(state, |cursor| cursor.add(text)),
            RawLine::Remove(text) => Self::content(state, |cursor| cursor.remove(text)),
            RawLine::NoNewlineMarker => (state, None),
            RawLine::Unrecognized(text) => {
                if !text.is_empty() {
                    log::debug!("skipping unrecognized line: {text:?}");
                }
                (state, None)
            }
        }
    }

    fn file_header(state: ParseState, line: FileHeaderLine<'_>) -> (ParseState, Option<FileDiff>) {
        match (state, line) {
            (ParseState::InFileHeader(mut file), FileHeaderLine::Git(_))
                if file.continues_with_git_line() =>
            {
                file.describe(line);
                (ParseState::InFileHeader(file), None)
            }
            (
                ParseState::InFileHeader(mut file),
                FileHeaderLine::OldPath(_) | FileHeaderLine::NewPath(_),
            ) => {
                file.describe(line);
                (ParseState::InFileHeader(file), None)
            }
            (previous, line) => (
                ParseState::InFileHeader(FileBuilder::from_header(line)),
                previous.finish(),
            ),
        }
    }

    fn content<F>(state: ParseState, line: F) -> (ParseState, Option<FileDiff>)
    where
        F: FnOnce(&mut HunkCursor) -> Line,
    {
        match state {
            ParseState::InHunk(mut file, mut cursor) => {
                file.push(line(&mut cursor));
                (ParseState::InHunk(file, cursor), None)
            }
            other => (other, None),
        }
    }
}
