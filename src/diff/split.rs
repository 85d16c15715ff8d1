use crate::diff::commit::CommitHeader;
use crate::diff::file::FileHeader;
use crate::diff::hunk::Hunk;
use crate::range::TextRange;
use crate::span::Span;
use error_set::error_set;

error_set! {
    /// Errors from positional queries
    QueryError := {
        /// A hunk with no file header anywhere before it. Such a hunk cannot
        /// be attributed to a file, so lookups fail instead of guessing.
        #[display("No file header precedes the hunk at offset {hunk_start}")]
        OrphanHunk { hunk_start: usize },
    }
}

/// Tokens that open a new section when found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Commit,
    File,
    Hunk,
}

impl Marker {
    /// Prefix match, like the upstream tools: body lines always carry a
    /// status column, so a bare `commit`/`diff`/`@@` at column zero can only
    /// open a section.
    fn of_line(line: &str) -> Option<Self> {
        if line.starts_with("commit") {
            Some(Self::Commit)
        } else if line.starts_with("diff") {
            Some(Self::File)
        } else if line.starts_with("@@") {
            Some(Self::Hunk)
        } else {
            None
        }
    }
}

/// A diff or log document split into its addressable sections.
///
/// Each collection is ordered by position and the sections never overlap:
/// together they tile the text from the first marker to one past the end of
/// input. Text before the first marker (log prologue, command banners) is
/// simply not represented.
///
/// A `SplitDiff` is a snapshot. It borrows the parsed text and is never
/// updated in place; when the text changes, parse again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDiff<'a> {
    pub commits: Vec<CommitHeader<'a>>,
    pub headers: Vec<FileHeader<'a>>,
    pub hunks: Vec<Hunk<'a>>,
}

impl<'a> SplitDiff<'a> {
    /// Split `text` into commit headers, file headers and hunks.
    ///
    /// Never fails: text without any marker (or no text at all) parses to
    /// three empty collections.
    ///
    /// # Examples
    /// ```
    /// use diff_split::SplitDiff;
    ///
    /// let text = "diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\n@@ -1 +1 @@\n-x\n+y\n";
    /// let diff = SplitDiff::parse(text);
    /// assert_eq!(diff.headers.len(), 1);
    /// assert_eq!(diff.hunks.len(), 1);
    /// ```
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        Self::parse_at(text, 0)
    }

    /// Like [`parse`](Self::parse), for text cut out of a larger document:
    /// `offset` is the absolute position of the first byte of `text`, and
    /// every span is reported in the enclosing document's coordinates.
    #[must_use]
    pub fn parse_at(text: &'a str, offset: usize) -> Self {
        let markers = scan_markers(text);

        let mut diff = SplitDiff {
            commits: Vec::new(),
            headers: Vec::new(),
            hunks: Vec::new(),
        };

        // The terminal sentinel sits one past the end of the text, so an
        // offset equal to the text length still falls inside the final
        // section.
        let sentinel = text.len() + 1;

        for (i, &(marker, start)) in markers.iter().enumerate() {
            let end = markers.get(i + 1).map_or(sentinel, |&(_, next)| next);
            let range = TextRange::with_span(
                &text[start..end.min(text.len())],
                Span::new(start + offset, end + offset),
            );
            match marker {
                Marker::Commit => diff.commits.push(CommitHeader { range }),
                Marker::File => diff.headers.push(FileHeader { range }),
                Marker::Hunk => diff.hunks.push(Hunk { range }),
            }
        }

        log::debug!(
            "split {} bytes into {} commits, {} file headers, {} hunks",
            text.len(),
            diff.commits.len(),
            diff.headers.len(),
            diff.hunks.len()
        );

        diff
    }

    /// The hunk whose span contains `offset`, if any. Sections never
    /// overlap, so at most one can.
    pub fn hunk_at(&self, offset: usize) -> Option<&Hunk<'a>> {
        self.hunks.iter().find(|hunk| hunk.span().contains(offset))
    }

    /// The file header owning `hunk`: the closest one starting before it.
    ///
    /// # Errors
    ///
    /// [`QueryError::OrphanHunk`] when no file header starts before the
    /// hunk. A hunk that cannot be attributed to a file is unusable, so this
    /// is a hard error while [`commit_for_hunk`](Self::commit_for_hunk)
    /// tolerates absence.
    pub fn header_for_hunk(&self, hunk: &Hunk<'a>) -> Result<&FileHeader<'a>, QueryError> {
        self.headers
            .iter()
            .filter(|header| header.span().start < hunk.span().start)
            .max_by_key(|header| header.span().start)
            .ok_or(QueryError::OrphanHunk {
                hunk_start: hunk.span().start,
            })
    }

    /// The hunk at `offset` together with its file header, or `Ok(None)`
    /// when the offset is outside every hunk.
    ///
    /// # Errors
    ///
    /// Same as [`header_for_hunk`](Self::header_for_hunk).
    pub fn header_and_hunk_at(
        &self,
        offset: usize,
    ) -> Result<Option<(&FileHeader<'a>, &Hunk<'a>)>, QueryError> {
        match self.hunk_at(offset) {
            Some(hunk) => Ok(Some((self.header_for_hunk(hunk)?, hunk))),
            None => Ok(None),
        }
    }

    /// The commit owning `hunk`, for log-style input. Plain diffs carry no
    /// commit lines at all, so absence is ordinary and yields `None`.
    pub fn commit_for_hunk(&self, hunk: &Hunk<'a>) -> Option<&CommitHeader<'a>> {
        self.commits
            .iter()
            .filter(|commit| commit.span().start < hunk.span().start)
            .max_by_key(|commit| commit.span().start)
    }

    /// The hunks belonging to `header`, in order: everything between it and
    /// the next file header. A header immediately followed by another header
    /// (binary files, mode-only changes) yields nothing, as does a header
    /// that is not part of this diff.
    pub fn hunks_for_header<'s>(
        &'s self,
        header: &FileHeader<'a>,
    ) -> impl Iterator<Item = &'s Hunk<'a>> {
        let bounds = self
            .headers
            .iter()
            .position(|candidate| candidate == header)
            .map(|idx| {
                let from = self.headers[idx].span().start;
                let until = self.headers.get(idx + 1).map(|next| next.span().start);
                (from, until)
            });

        self.hunks
            .iter()
            .skip_while(move |hunk| match bounds {
                Some((from, _)) => hunk.span().start < from,
                None => true,
            })
            .take_while(move |hunk| match bounds {
                Some((_, Some(until))) => hunk.span().start < until,
                Some((_, None)) => true,
                None => false,
            })
    }
}

/// Find every line that opens a new section, in document order.
fn scan_markers(text: &str) -> Vec<(Marker, usize)> {
    let mut markers = Vec::new();
    let mut pos = 0;
    for line in text.split_inclusive('\n') {
        if let Some(marker) = Marker::of_line(line) {
            log::trace!("{marker:?} marker at {pos}");
            markers.push((marker, pos));
        }
        pos += line.len();
    }
    markers
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const LOG: &str = concat!(
        "commit 1111aaa\n",
        "Author: Ada <ada@example.com>\n",
        "\n",
        "    touch alpha\n",
        "\n",
        "diff --git a/alpha.txt b/alpha.txt\n",
        "--- a/alpha.txt\n",
        "+++ b/alpha.txt\n",
        "@@ -1 +1 @@\n",
        "-old\n",
        "+new\n",
        "@@ -5,2 +5,2 @@\n",
        " ctx\n",
        "-before\n",
        "+after\n",
        "diff --git a/beta.txt b/beta.txt\n",
        "--- a/beta.txt\n",
        "+++ b/beta.txt\n",
        "@@ -3 +3 @@\n",
        "-x\n",
        "+y\n",
        "commit 2222bbb\n",
        "Author: Ada <ada@example.com>\n",
        "\n",
        "    touch gamma\n",
        "\n",
        "diff --git a/gamma.txt b/gamma.txt\n",
        "--- a/gamma.txt\n",
        "+++ b/gamma.txt\n",
        "@@ -9 +9 @@\n",
        "-p\n",
        "+q\n",
    );

    /// Merged by position, the sections must tile the text from the first
    /// marker to one past its end.
    fn assert_partition(diff: &SplitDiff<'_>, text: &str, offset: usize) {
        let mut spans: Vec<Span> = diff
            .commits
            .iter()
            .map(CommitHeader::span)
            .chain(diff.headers.iter().map(FileHeader::span))
            .chain(diff.hunks.iter().map(Hunk::span))
            .collect();
        spans.sort();

        if let (Some(first), Some(last)) = (spans.first(), spans.last()) {
            assert_eq!(last.end, text.len() + 1 + offset);
            assert!(first.start >= offset);
        }
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn empty_text_parses_to_nothing() {
        let diff = SplitDiff::parse("");
        assert!(diff.commits.is_empty());
        assert!(diff.headers.is_empty());
        assert!(diff.hunks.is_empty());
    }

    #[test]
    fn markerless_text_parses_to_nothing() {
        let diff = SplitDiff::parse("nothing here\nlooks like a patch\n");
        assert!(diff.commits.is_empty());
        assert!(diff.headers.is_empty());
        assert!(diff.hunks.is_empty());
    }

    #[test]
    fn splits_a_log_into_sections() {
        let diff = SplitDiff::parse(LOG);
        assert_eq!(diff.commits.len(), 2);
        assert_eq!(diff.headers.len(), 3);
        assert_eq!(diff.hunks.len(), 4);
        assert_partition(&diff, LOG, 0);
    }

    #[test]
    fn sections_start_where_their_markers_do() {
        let diff = SplitDiff::parse(LOG);

        assert_eq!(diff.commits[0].span().start, 0);
        assert_eq!(
            diff.commits[1].span().start,
            LOG.find("commit 2222bbb").unwrap()
        );
        assert_eq!(
            diff.headers[0].span().start,
            LOG.find("diff --git a/alpha.txt").unwrap()
        );
        assert_eq!(diff.hunks[0].span().start, LOG.find("@@ -1").unwrap());
        assert_eq!(diff.hunks[3].span().start, LOG.find("@@ -9").unwrap());
    }

    #[test]
    fn final_section_extends_one_past_the_end() {
        let diff = SplitDiff::parse(LOG);
        let last = diff.hunks.last().unwrap();
        assert_eq!(last.span().end, LOG.len() + 1);
        assert_eq!(last.text(), "@@ -9 +9 @@\n-p\n+q\n");
    }

    #[test]
    fn preamble_before_the_first_marker_is_unrepresented() {
        let text = "Some prologue the pager printed\n\ndiff --git a/x b/x\n+++ b/x\n@@ -1 +1 @@\n+z\n";
        let diff = SplitDiff::parse(text);

        assert_eq!(diff.headers.len(), 1);
        let first_marker = text.find("diff --git").unwrap();
        assert_eq!(diff.headers[0].span().start, first_marker);
        assert_partition(&diff, text, 0);
    }

    #[test]
    fn parse_at_shifts_every_span() {
        let plain = SplitDiff::parse(LOG);
        let shifted = SplitDiff::parse_at(LOG, 1000);

        assert_eq!(shifted.hunks.len(), plain.hunks.len());
        for (a, b) in plain.hunks.iter().zip(&shifted.hunks) {
            assert_eq!(a.span().start + 1000, b.span().start);
            assert_eq!(a.span().end + 1000, b.span().end);
            assert_eq!(a.text(), b.text());
        }
        assert_partition(&shifted, LOG, 1000);
    }

    #[test]
    fn marker_matching_is_prefix_based() {
        // Faithful to the upstream scanners: no word boundary after the
        // token.
        let diff = SplitDiff::parse("committed by hand\ndifferent stuff\n");
        assert_eq!(diff.commits.len(), 1);
        assert_eq!(diff.headers.len(), 1);
    }

    #[test]
    fn crlf_terminated_lines_scan_the_same() {
        let text = "diff --git a/x b/x\r\n+++ b/x\r\n@@ -1 +1 @@\r\n+z\r\n";
        let diff = SplitDiff::parse(text);
        assert_eq!(diff.headers.len(), 1);
        assert_eq!(diff.hunks.len(), 1);
        assert_partition(&diff, text, 0);
    }

    #[test]
    fn hunk_at_respects_half_open_spans() {
        let diff = SplitDiff::parse(LOG);

        for hunk in &diff.hunks {
            let at_start = diff.hunk_at(hunk.span().start).unwrap();
            assert_eq!(at_start.span(), hunk.span());

            if let Some(next) = diff.hunk_at(hunk.span().end) {
                assert_ne!(next.span(), hunk.span());
            }
        }
    }

    #[test]
    fn hunk_at_the_very_end_hits_the_final_hunk() {
        let diff = SplitDiff::parse(LOG);
        let last = diff.hunks.last().unwrap();

        assert_eq!(diff.hunk_at(LOG.len()).unwrap().span(), last.span());
        assert_eq!(diff.hunk_at(LOG.len() + 1), None);
    }

    #[test]
    fn hunk_at_outside_any_hunk_is_none() {
        let diff = SplitDiff::parse(LOG);
        // Offset 0 sits in the first commit header.
        assert_eq!(diff.hunk_at(0), None);
    }

    #[test]
    fn header_for_hunk_finds_the_nearest_preceding() {
        let diff = SplitDiff::parse(LOG);

        let alpha = diff.headers[0];
        let beta = diff.headers[1];
        let gamma = diff.headers[2];

        assert_eq!(*diff.header_for_hunk(&diff.hunks[0]).unwrap(), alpha);
        assert_eq!(*diff.header_for_hunk(&diff.hunks[1]).unwrap(), alpha);
        assert_eq!(*diff.header_for_hunk(&diff.hunks[2]).unwrap(), beta);
        assert_eq!(*diff.header_for_hunk(&diff.hunks[3]).unwrap(), gamma);
    }

    #[test]
    fn headerless_hunk_is_an_error() {
        let text = "@@ -1 +1 @@\n+stray\n";
        let diff = SplitDiff::parse(text);
        assert_eq!(diff.hunks.len(), 1);

        let result = diff.header_for_hunk(&diff.hunks[0]);
        assert!(matches!(result, Err(QueryError::OrphanHunk { hunk_start: 0 })));
    }

    #[test]
    fn commit_for_hunk_maps_hunks_to_their_commit() {
        let diff = SplitDiff::parse(LOG);

        for hunk in &diff.hunks[..3] {
            let commit = diff.commit_for_hunk(hunk).unwrap();
            assert_eq!(commit.commit_hash(), Some("1111aaa"));
        }
        let commit = diff.commit_for_hunk(&diff.hunks[3]).unwrap();
        assert_eq!(commit.commit_hash(), Some("2222bbb"));
    }

    #[test]
    fn commit_for_hunk_tolerates_plain_diffs() {
        let text = "diff --git a/x b/x\n+++ b/x\n@@ -1 +1 @@\n+z\n";
        let diff = SplitDiff::parse(text);
        assert_eq!(diff.commit_for_hunk(&diff.hunks[0]), None);
    }

    #[test]
    fn header_and_hunk_at_composes_both_lookups() {
        let diff = SplitDiff::parse(LOG);
        let inside_second_hunk = LOG.find("-before").unwrap();

        let (header, hunk) = diff.header_and_hunk_at(inside_second_hunk).unwrap().unwrap();
        assert_eq!(header.path(), Some("alpha.txt"));
        assert_eq!(hunk.span().start, LOG.find("@@ -5,2").unwrap());

        // Offsets inside a file header have no hunk.
        let inside_header = LOG.find("+++ b/alpha.txt").unwrap();
        assert_eq!(diff.header_and_hunk_at(inside_header).unwrap(), None);
    }

    #[test]
    fn header_and_hunk_at_propagates_the_orphan_error() {
        let text = "@@ -1 +1 @@\n+stray\n";
        let diff = SplitDiff::parse(text);
        assert!(matches!(
            diff.header_and_hunk_at(2),
            Err(QueryError::OrphanHunk { .. })
        ));
    }

    #[test]
    fn hunks_for_header_yields_exactly_the_hunks_between_headers() {
        let diff = SplitDiff::parse(LOG);

        let alpha: Vec<Span> = diff
            .hunks_for_header(&diff.headers[0])
            .map(Hunk::span)
            .collect();
        assert_eq!(alpha, vec![diff.hunks[0].span(), diff.hunks[1].span()]);

        let beta: Vec<Span> = diff
            .hunks_for_header(&diff.headers[1])
            .map(Hunk::span)
            .collect();
        assert_eq!(beta, vec![diff.hunks[2].span()]);

        let gamma: Vec<Span> = diff
            .hunks_for_header(&diff.headers[2])
            .map(Hunk::span)
            .collect();
        assert_eq!(gamma, vec![diff.hunks[3].span()]);
    }

    #[test]
    fn header_followed_by_header_owns_no_hunks() {
        let text = concat!(
            "diff --git a/logo.png b/logo.png\n",
            "Binary files a/logo.png and b/logo.png differ\n",
            "diff --git a/x b/x\n",
            "+++ b/x\n",
            "@@ -1 +1 @@\n",
            "+z\n",
        );
        let diff = SplitDiff::parse(text);

        assert_eq!(diff.hunks_for_header(&diff.headers[0]).count(), 0);
        assert_eq!(diff.hunks_for_header(&diff.headers[1]).count(), 1);
    }

    #[test]
    fn foreign_header_owns_no_hunks() {
        let diff = SplitDiff::parse(LOG);
        let foreign = FileHeader {
            range: TextRange::new("diff --git a/other b/other\n+++ b/other\n", 9999),
        };
        assert_eq!(diff.hunks_for_header(&foreign).count(), 0);
    }
}
