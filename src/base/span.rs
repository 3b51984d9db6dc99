use std::fmt::{self, Debug};
use std::ops::Range;

/// A `(start, end)` byte offset pair locating a substring within a larger string.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shifts the span towards the beginning of the string, saturating at zero.
    #[inline]
    pub fn shift_back(self, offset: usize) -> Self {
        Span {
            start: self.start.saturating_sub(offset),
            end: self.end.saturating_sub(offset),
        }
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.range()
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_back_saturates() {
        assert_eq!(Span::new(0, 14).shift_back(1), Span::new(0, 13));
        assert_eq!(Span::new(14, 31).shift_back(1), Span::new(13, 30));
    }

    #[test]
    fn range_conversion() {
        let span: Span = (3..7).into();

        assert_eq!(span.len(), 4);
        assert_eq!(&"0123456789"[span.range()], "3456");
        assert!(!span.is_empty());
    }
}
