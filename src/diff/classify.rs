//! Raw line classification.
//!
//! Each input line is looked at exactly once and turned into a [`RawLine`].
//! The parser state machine only ever matches on that variant.

use super::hunk::HunkHeader;

/// Where in the patch the line was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Before any hunk of the current file (or before any file)
    Preamble,
    /// Inside a hunk. `complete` once every line its header announced was read.
    Hunk { complete: bool },
}

/// Lines that introduce or describe a file section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileHeaderLine<'a> {
    /// `Index: path`
    Index(&'a str),
    /// `diff --git a/path b/path`, carrying the `b/` path when one is found
    Git(Option<&'a str>),
    /// `--- a/path`, `None` for `/dev/null`
    OldPath(Option<&'a str>),
    /// `+++ b/path`, `None` for `/dev/null`
    NewPath(Option<&'a str>),
}

/// A classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    FileHeader(FileHeaderLine<'a>),
    HunkHeader(HunkHeader),
    Context(&'a str),
    Add(&'a str),
    Remove(&'a str),
    /// `\ No newline at end of file` and friends
    NoNewlineMarker,
    Unrecognized(&'a str),
}

/// Classify one line of patch text.
///
/// ```
/// use patch_groups::diff::classify::{classify, RawLine, Scope};
///
/// let scope = Scope::Hunk { complete: false };
/// assert_eq!(classify("-gone", scope), RawLine::Remove("gone"));
/// assert_eq!(classify("", scope), RawLine::Context(""));
/// assert_eq!(classify("\\ No newline at end of file", scope), RawLine::NoNewlineMarker);
/// ```
pub fn classify(line: &str, scope: Scope) -> RawLine<'_> {
    if let Some(path) = line.strip_prefix("Index: ") {
        return RawLine::FileHeader(FileHeaderLine::Index(path));
    }
    if let Some(rest) = line.strip_prefix("diff --git ") {
        return RawLine::FileHeader(FileHeaderLine::Git(git_new_path(rest)));
    }
    if line.starts_with("@@") {
        return match HunkHeader::parse(line) {
            Ok(header) => RawLine::HunkHeader(header),
            Err(err) => {
                log::debug!("{err}");
                RawLine::Unrecognized(line)
            }
        };
    }

    match scope {
        Scope::Preamble => classify_preamble(line),
        Scope::Hunk { complete } => classify_content(line, complete),
    }
}

fn classify_preamble(line: &str) -> RawLine<'_> {
    if let Some(path) = line.strip_prefix("--- ") {
        RawLine::FileHeader(FileHeaderLine::OldPath(patch_path(path, "a/")))
    } else if let Some(path) = line.strip_prefix("+++ ") {
        RawLine::FileHeader(FileHeaderLine::NewPath(patch_path(path, "b/")))
    } else {
        RawLine::Unrecognized(line)
    }
}

fn classify_content(line: &str, complete: bool) -> RawLine<'_> {
    let mut chars = line.chars();
    match chars.next() {
        None => RawLine::Context(""),
        Some('\\') => RawLine::NoNewlineMarker,
        // Past the announced counts only trailers or a plain-diff `--- ` line follow
        Some(_) if complete => classify_preamble(line),
        Some(' ') => RawLine::Context(chars.as_str()),
        Some('+') => RawLine::Add(chars.as_str()),
        Some('-') => RawLine::Remove(chars.as_str()),
        Some(_) => RawLine::Unrecognized(line),
    }
}

/// Path from a `---`/`+++` line: drops a trailing tab-separated timestamp and
/// the `a/` or `b/` prefix
fn patch_path<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    let path = raw.split('\t').next().unwrap_or(raw).trim_end();
    if path == "/dev/null" || path.is_empty() {
        return None;
    }
    Some(path.strip_prefix(prefix).unwrap_or(path))
}

/// The `b/` side of `a/path b/path`
fn git_new_path(rest: &str) -> Option<&str> {
    same_path(rest)
        .or_else(|| rest.rsplit_once(" b/").map(|(_, path)| path))
        .or_else(|| rest.split_whitespace().last())
        .filter(|path| !path.is_empty())
}

/// `a/path b/path` naming one path twice, split into equal halves
fn same_path(rest: &str) -> Option<&str> {
    let both = rest.strip_prefix("a/")?;
    let half = both.len().checked_sub(3)? / 2;
    let (old, new) = (both.get(..half)?, both.get(half..)?.strip_prefix(" b/")?);
    (old == new).then_some(new)
}
