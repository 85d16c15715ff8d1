use crate::span::Span;

/// A slice of diff source text tagged with its absolute position.
///
/// Every parsed section of a diff is one of these under the hood: the exact
/// substring plus the half-open [`Span`] locating it in the original input.
/// Ranges borrow from the parsed text, so nothing is copied out of the
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl<'a> TextRange<'a> {
    /// Tag `text` as starting at `start`; the span end follows from the text
    /// length.
    pub fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            span: Span::new(start, start + text.len()),
        }
    }

    /// Tag `text` with an explicit span. The scanner uses this for the final
    /// section of a document, whose span end sits one past the end of input.
    pub fn with_span(text: &'a str, span: Span) -> Self {
        Self { text, span }
    }

    /// Split into terminated lines, each retaining its line ending (`\r\n`
    /// stays intact) and carrying its absolute position. A final line without
    /// a terminator is still returned; empty text yields no lines.
    pub fn lines(&self) -> Vec<TextRange<'a>> {
        let mut start = self.span.start;
        self.text
            .split_inclusive('\n')
            .map(|line| {
                let range = TextRange::new(line, start);
                start = range.span.end;
                range
            })
            .collect()
    }
}
