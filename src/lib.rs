//! Parse unified diff text into files, hunks and presentation groups.
//!
//! The input is patch text as produced by version control tools, following the
//! `Index:` / `diff --git` / `---` / `+++` / `@@` layout. Each file section
//! becomes a [`FileDiff`] whose lines are classified as header, context, add or
//! remove and bundled into [`Group`]s: every hunk header stands alone, and runs
//! of unchanged lines are kept apart from runs of changed lines so a viewer can
//! collapse or expand them independently.
//!
//! ```
//! use patch_groups::{GroupKind, parse};
//!
//! let patch = "diff --git a/example.cc b/example.cc\n\
//!              --- a/example.cc\n\
//!              +++ b/example.cc\n\
//!              @@ -1,2 +1,2 @@ int main()\n \
//!              return 0;\n\
//!              -}\n\
//!              +}  // main";
//!
//! let files = parse(patch);
//! let kinds: Vec<_> = files[0].groups.iter().map(|group| group.kind()).collect();
//! assert_eq!(kinds, [GroupKind::Header, GroupKind::Context, GroupKind::Change]);
//! ```
//!
//! Parsing never fails. Lines that do not fit the layout are skipped, so a
//! malformed patch yields an incomplete result rather than an error.

pub mod diff;
mod image;

pub use diff::{
    DiffParser, FileDiff, Group, GroupKind, HeaderError, HunkHeader, HunkRange, Line, LineKind,
    ParseState, format_files, parse,
};
pub use image::is_image_file;
