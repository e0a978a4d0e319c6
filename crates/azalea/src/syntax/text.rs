#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset (or byte length) into UTF-8 source text.
///
/// Scanned inputs are limited to `u32::MAX` bytes; larger offsets saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextSize(u32);

/// Half-open byte span `start..end` of a token or error in the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextSize {
    #[must_use]
    pub const fn from(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn into(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Saturating conversion from a `usize` cursor.
    #[must_use]
    pub fn of(offset: usize) -> Self {
        Self(u32::try_from(offset).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl TextRange {
    #[must_use]
    pub const fn new(start: TextSize, end: TextSize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn at(start: TextSize, len: TextSize) -> Self {
        Self::new(start, TextSize(start.0.saturating_add(len.0)))
    }

    /// Span covering `len` bytes starting at byte cursor `start`.
    #[must_use]
    pub fn at_offset(start: usize, len: usize) -> Self {
        Self::at(TextSize::of(start), TextSize::of(len))
    }

    #[must_use]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[must_use]
    pub const fn len(self) -> TextSize {
        TextSize(self.end.0 - self.start.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// The text this span covers, if it lies on char boundaries of `source`.
    #[must_use]
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.start.to_usize()..self.end.to_usize())
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

#[cfg(feature = "diagnostics")]
impl From<TextRange> for miette::SourceSpan {
    fn from(range: TextRange) -> Self {
        use miette::SourceOffset;
        Self::new(
            SourceOffset::from(range.start().to_usize()),
            range.len().to_usize(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_of_saturates() {
        assert_eq!(TextSize::of(42).into(), 42);
        assert_eq!(TextSize::of(usize::MAX).into(), u32::MAX);
    }

    #[test]
    fn test_text_range_at_offset() {
        let range = TextRange::at_offset(10, 5);
        assert_eq!(range.start(), TextSize::from(10));
        assert_eq!(range.end(), TextSize::from(15));
        assert_eq!(range.len(), TextSize::from(5));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_text_range_slice() {
        let source = "global x is 42";
        assert_eq!(TextRange::at_offset(7, 1).slice(source), Some("x"));
        assert_eq!(TextRange::at_offset(12, 2).slice(source), Some("42"));
        assert_eq!(TextRange::at_offset(12, 9).slice(source), None);
    }

    #[test]
    fn test_text_range_display() {
        let range = TextRange::new(TextSize::from(10), TextSize::from(20));
        assert_eq!(format!("{range}"), "10..20");
    }
}
