use crate::range::TextRange;
use crate::span::Span;
use error_set::error_set;

error_set! {
    /// Errors from strict hunk header parsing
    HunkHeaderError := {
        /// Header declares more than two line ranges, i.e. a merge-style
        /// `@@@` hunk with several parents
        #[display("Unsupported combined diff hunk header: {header}")]
        UnsupportedCombinedDiff { header: String },
        /// Header declares fewer than two line ranges
        #[display("Malformed hunk header: {header}")]
        MalformedHunkHeader { header: String },
    }
}

/// One `@@` block from a diff: the metadata line plus every body line up to
/// the next marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hunk<'a> {
    pub range: TextRange<'a>,
}

impl<'a> Hunk<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// Width of the status columns on body lines: the leading `@` count
    /// minus one. `@@` means one column, `@@@` and up mean combined hunks
    /// with one column per parent.
    pub fn mode_len(&self) -> usize {
        self.text()
            .chars()
            .take_while(|&c| c == '@')
            .count()
            .saturating_sub(1)
    }

    /// The metadata line, up to and including its newline. A hunk with no
    /// newline at all is header through and through.
    pub fn header(&self) -> HunkHeader<'a> {
        HunkHeader {
            range: TextRange::new(&self.text()[..self.header_end()], self.span().start),
        }
    }

    /// Everything after the metadata line. The content's span ends where the
    /// hunk's does, even when that end sits past the last byte.
    pub fn content(&self) -> HunkContent<'a> {
        let body_start = self.header_end();
        HunkContent {
            range: TextRange::with_span(
                &self.text()[body_start..],
                Span::new(self.span().start + body_start, self.span().end),
            ),
            mode_len: self.mode_len(),
        }
    }

    fn header_end(&self) -> usize {
        self.text().find('\n').map_or(self.text().len(), |i| i + 1)
    }
}

/// The two line ranges a two-way hunk header declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HunkRanges {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
}

/// The `@@ -start,count +start,count @@` metadata line of a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HunkHeader<'a> {
    pub range: TextRange<'a>,
}

impl<'a> HunkHeader<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// Every `-start[,count]` / `+start[,count]` group between the leading
    /// `@` run and the next `@`, in order, with an omitted count defaulting
    /// to 1. One group per parent, the last one always the `+` target side.
    ///
    /// Never fails; a header with no parsable groups yields an empty vec.
    pub fn metadata(&self) -> Vec<(u32, u32)> {
        let body = self.text().trim_start_matches('@');
        let body = match body.split_once('@') {
            Some((ranges, _)) => ranges,
            None => body,
        };

        let bytes = body.as_bytes();
        let mut groups = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if (bytes[i] == b'-' || bytes[i] == b'+')
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            {
                let (start, after_start) = take_number(body, i + 1);
                let (count, next) = if bytes.get(after_start) == Some(&b',')
                    && bytes.get(after_start + 1).is_some_and(u8::is_ascii_digit)
                {
                    take_number(body, after_start + 1)
                } else {
                    (1, after_start)
                };
                groups.push((start, count));
                i = next;
            } else {
                i += 1;
            }
        }
        groups
    }

    /// The old and new line ranges of a two-way hunk.
    ///
    /// # Errors
    ///
    /// [`HunkHeaderError::UnsupportedCombinedDiff`] when the header declares
    /// more than two ranges, [`HunkHeaderError::MalformedHunkHeader`] when it
    /// declares fewer. Both carry the raw header text.
    pub fn parse(&self) -> Result<HunkRanges, HunkHeaderError> {
        match self.metadata().as_slice() {
            [(old_start, old_count), (new_start, new_count)] => Ok(HunkRanges {
                old_start: *old_start,
                old_count: *old_count,
                new_start: *new_start,
                new_count: *new_count,
            }),
            [_, _, ..] => Err(HunkHeaderError::UnsupportedCombinedDiff {
                header: self.text().to_string(),
            }),
            _ => Err(HunkHeaderError::MalformedHunkHeader {
                header: self.text().to_string(),
            }),
        }
    }

    /// Start line on the target side: the last declared range, whatever the
    /// parent count. The lenient counterpart of [`parse`](Self::parse) for
    /// callers that only need to know where the hunk lands.
    pub fn new_start(&self) -> Option<u32> {
        self.metadata().last().map(|&(start, _)| start)
    }
}

/// Parse the run of ascii digits starting at `from`; returns the value and
/// the index just past the run. Values too large for `u32` clamp to its max.
fn take_number(text: &str, from: usize) -> (u32, usize) {
    let bytes = text.as_bytes();
    let mut end = from;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    (text[from..end].parse().unwrap_or(u32::MAX), end)
}

/// The body of a hunk: every line after the metadata line, still carrying
/// the status-column width of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HunkContent<'a> {
    pub range: TextRange<'a>,
    pub mode_len: usize,
}

impl<'a> HunkContent<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// The body split into lines, terminators kept, each at its absolute
    /// position.
    pub fn lines(&self) -> Vec<HunkLine<'a>> {
        self.range
            .lines()
            .into_iter()
            .map(|range| HunkLine {
                range,
                mode_len: self.mode_len,
            })
            .collect()
    }
}

/// One body line of a hunk: status columns followed by file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HunkLine<'a> {
    pub range: TextRange<'a>,
    pub mode_len: usize,
}

impl<'a> HunkLine<'a> {
    pub fn text(&self) -> &'a str {
        self.range.text
    }

    pub fn span(&self) -> Span {
        self.range.span
    }

    /// The status columns: the first `mode_len` characters. A line shorter
    /// than that yields what is there.
    pub fn mode(&self) -> &'a str {
        &self.text()[..self.mode_split()]
    }

    /// Everything after the status columns, terminator included.
    pub fn content(&self) -> &'a str {
        &self.text()[self.mode_split()..]
    }

    /// Removed from at least one parent version.
    pub fn is_from_line(&self) -> bool {
        self.mode().contains('-')
    }

    /// Added relative to at least one parent version.
    pub fn is_to_line(&self) -> bool {
        self.mode().contains('+')
    }

    /// Present unchanged: every status column is blank.
    pub fn is_context(&self) -> bool {
        self.mode().trim().is_empty()
    }

    /// The `\ No newline at end of file` marker git prints after the last
    /// line of a file lacking a final newline.
    pub fn is_no_newline_marker(&self) -> bool {
        self.text().trim() == "\\ No newline at end of file"
    }

    /// Byte index after `mode_len` characters, clamped to the line length.
    fn mode_split(&self) -> usize {
        self.text()
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.mode_len)
            .unwrap_or(self.text().len())
    }
}
