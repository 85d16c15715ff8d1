use crate::range::TextRange;
use crate::span::Span;

/// One commit block from log-style output: the `commit <hash>` line plus
/// everything up to the next marker (author, date, message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitHeader<'a> {
    pub range: TextRange<'a>,
}

impl<'a> CommitHeader<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// The hash token from the first line, for lines of the `commit <hash>`
    /// shape. Anything after the hash (ref decorations) is dropped; a first
    /// line with some other shape yields `None`.
    pub fn commit_hash(&self) -> Option<&'a str> {
        let first_line = self.text().lines().next()?;
        let rest = first_line.strip_prefix("commit ")?;
        Some(match rest.split_once(' ') {
            Some((hash, _)) => hash,
            None => rest,
        })
    }
}
