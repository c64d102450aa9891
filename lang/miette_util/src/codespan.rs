use std::fmt;
use std::ops::Range;

/// The raw, untyped index. Offsets are 32 bits wide, so stub files are limited to 4 GiB.
/// The parser rejects larger inputs.
pub type RawIndex = u32;

/// A byte position in a stub file.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteIndex(pub RawIndex);

impl ByteIndex {
    /// Convert the position into a `usize`, for use in slicing
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ByteIndex({})", self.0)
    }
}

impl fmt::Display for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ByteIndex {
    fn from(index: u32) -> ByteIndex {
        ByteIndex(index)
    }
}

/// Offsets past the 4 GiB limit saturate at `RawIndex::MAX`.
impl From<usize> for ByteIndex {
    fn from(index: usize) -> ByteIndex {
        ByteIndex(RawIndex::try_from(index).unwrap_or(RawIndex::MAX))
    }
}

/// A half-open byte range `[start, end)` in a stub file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: ByteIndex,
    pub end: ByteIndex,
}

impl Span {
    pub fn new(start: impl Into<ByteIndex>, end: impl Into<ByteIndex>) -> Span {
        let start = start.into();
        let end = end.into();
        debug_assert!(end >= start);
        Span { start, end }
    }

    /// Combine two spans by taking the start of the earlier span
    /// and the end of the later span.
    ///
    /// ```rust
    /// use stubcat_miette_util::codespan::Span;
    ///
    /// assert_eq!(Span::new(0u32, 4u32).merge(Span::new(10u32, 16u32)), Span::new(0u32, 16u32));
    /// ```
    pub fn merge(self, other: Span) -> Span {
        Span { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    pub fn len(self) -> usize {
        (self.end.0 - self.start.0) as usize
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start.to_usize()..span.end.to_usize()
    }
}

/// A 1-indexed line and column, as shown to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of the first character of every line in a source text.
#[derive(Debug, Clone)]
pub struct LineStarts {
    starts: Vec<usize>,
}

impl LineStarts {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        LineStarts { starts }
    }

    /// The location of a byte index. Columns count bytes, not characters.
    pub fn location(&self, index: ByteIndex) -> Location {
        let offset = index.to_usize();
        let line = match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Location { line: line + 1, column: offset - self.starts[line] + 1 }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_disjoint() {
        let a = Span::from(1..5);
        let b = Span::from(10..20);
        assert_eq!(a.merge(b), Span::from(1..20));
        assert_eq!(b.merge(a), Span::from(1..20));
    }

    #[test]
    fn merge_identity() {
        let a = Span::from(3..7);
        assert_eq!(a.merge(a), a);
        assert_eq!(a.len(), 4);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn offsets_saturate() {
        let past_limit = RawIndex::MAX as usize + 1;
        assert_eq!(ByteIndex::from(past_limit), ByteIndex(RawIndex::MAX));
        assert_eq!(ByteIndex::from(7usize), ByteIndex(7));
    }

    #[test]
    fn location_first_line() {
        let lines = LineStarts::new("type int int\n");
        assert_eq!(lines.location(ByteIndex(5)), Location { line: 1, column: 6 });
    }

    #[test]
    fn location_later_lines() {
        let src = "package fmt\n\nfunc Print()\n";
        let lines = LineStarts::new(src);
        assert_eq!(lines.location(ByteIndex(12)), Location { line: 2, column: 1 });
        assert_eq!(lines.location(ByteIndex(13)), Location { line: 3, column: 1 });
        assert_eq!(lines.location(ByteIndex(18)), Location { line: 3, column: 6 });
    }
}
