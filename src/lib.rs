//! Split unified-diff text into its structural sections and query them by
//! position.
//!
//! The input is whatever `git log -p` or `git diff` printed: flat text in
//! which lines starting with `commit`, `diff` or `@@` each open a new
//! section. [`SplitDiff::parse`] segments the text into commit headers, file
//! headers and hunks in one pass, every entity carrying a [`Span`] into the
//! original text, and the queries answer which hunk contains an offset and
//! which file or commit owns a hunk.
//!
//! # Examples
//! ```
//! use diff_split::SplitDiff;
//!
//! let text = "diff --git a/foo b/foo\n--- a/foo\n+++ b/foo\n@@ -1 +1 @@\n-a\n+b\n";
//! let diff = SplitDiff::parse(text);
//!
//! let hunk = diff.hunk_at(45).unwrap();
//! let header = diff.header_for_hunk(hunk)?;
//! assert_eq!(header.path(), Some("foo"));
//! assert_eq!(hunk.header().parse()?.new_start, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod diff;
mod range;
pub mod report;
mod span;

pub use diff::commit::CommitHeader;
pub use diff::file::FileHeader;
pub use diff::hunk::{Hunk, HunkContent, HunkHeader, HunkHeaderError, HunkLine, HunkRanges};
pub use diff::split::{QueryError, SplitDiff};
pub use range::TextRange;
pub use span::Span;
