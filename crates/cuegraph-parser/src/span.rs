//! Byte spans into the JSON source.

use std::ops::Range;

/// A half-open byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a one-byte span at a 1-based line and column, as reported by
    /// `serde_json`. The span is clamped to the end of the source.
    pub fn at_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let start = (line_start + column.saturating_sub(1)).min(source.len());
        let end = (start + 1).min(source.len());
        Self::new(start..end)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_column_first_line() {
        let span = Span::at_line_column("[1, x]", 1, 5);
        assert_eq!(span, Span::new(4..5));
    }

    #[test]
    fn test_at_line_column_later_line() {
        let source = "[\n  1,\n  x\n]";
        let span = Span::at_line_column(source, 3, 3);
        assert_eq!(&source[span.start()..span.end()], "x");
    }

    #[test]
    fn test_at_line_column_clamps_to_end() {
        let span = Span::at_line_column("[", 1, 2);
        assert_eq!(span.start(), 1);
        assert!(span.is_empty());
    }
}
