use crate::range::TextRange;
use crate::span::Span;

/// One per-file header block from a diff: the `diff --git ...` line and the
/// metadata lines after it (`index`, mode changes, `---`, `+++`), up to the
/// first hunk or the next marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHeader<'a> {
    pub range: TextRange<'a>,
}

impl<'a> FileHeader<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// The target-side path, extracted from the `+++ b/path` line. One
    /// trailing tab is tolerated (git quotes paths with trailing whitespace
    /// that way).
    ///
    /// Binary file headers have no `+++` line and deletions target
    /// `/dev/null`; both yield `None`.
    pub fn path(&self) -> Option<&'a str> {
        self.text()
            .lines()
            .filter_map(|line| line.strip_prefix("+++ b/"))
            .map(|path| path.strip_suffix('\t').unwrap_or(path))
            .find(|path| !path.is_empty())
    }

    /// The `diff ...` line itself, without its terminator.
    pub fn first_line(&self) -> &'a str {
        self.text().lines().next().unwrap_or("")
    }
}
