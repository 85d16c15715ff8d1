use std::ops::{Add, Range, Sub};

/// A half-open byte span `[start, end)` into diff source text.
///
/// Offsets are measured in bytes (UTF-8), matching Rust string indexing.
/// All parsed sections of a diff carry one of these, so positions reported
/// by callers (cursor offsets, search hits) can be compared directly against
/// parsed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must be <= end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `offset` falls inside the span. Half-open: the start is
    /// included, the end is not.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Translate both endpoints by `delta`. Offsets saturate at zero rather
    /// than wrapping.
    #[must_use]
    pub fn shift(self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
        }
    }
}

impl Add<isize> for Span {
    type Output = Span;

    fn add(self, delta: isize) -> Span {
        self.shift(delta)
    }
}

impl Sub<isize> for Span {
    type Output = Span;

    fn sub(self, delta: isize) -> Span {
        self.shift(delta.saturating_neg())
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl IntoIterator for Span {
    type Item = usize;
    type IntoIter = std::array::IntoIter<usize, 2>;

    /// The two endpoints in order, start then end.
    fn into_iter(self) -> Self::IntoIter {
        [self.start, self.end].into_iter()
    }
}
