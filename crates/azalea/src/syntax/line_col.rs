//! Line and column lookup for scanned input.
//!
//! The lexer reports token lines and error positions through a [`LineIndex`]
//! built once per scanned string.

use crate::syntax::TextSize;

/// A one-based line and column position in source text.
///
/// Columns count characters, not bytes, so a multi-byte character advances
/// the column by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Byte offsets of every line start in a source string.
///
/// Lookups binary-search the line table, so converting many offsets of the
/// same input is cheap after the single scan in [`LineIndex::new`].
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Offsets where a line begins; always starts with 0.
    line_starts: Vec<TextSize>,
}

impl<'a> LineIndex<'a> {
    /// Index the line starts of `text`.
    ///
    /// Only `\n` terminates a line; a `\r\n` pair therefore counts once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use azalea::syntax::line_col::{LineCol, LineIndex};
    /// use azalea::syntax::TextSize;
    ///
    /// let index = LineIndex::new("global x\nis 42");
    /// assert_eq!(index.line_col(TextSize::from(12)), LineCol::new(2, 4));
    /// ```
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![TextSize::zero()];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| TextSize::of(i + 1)));
        Self { text, line_starts }
    }

    /// One-based line and column of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the text.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(TextSize::of(self.text.len()));
        let line = self.line_index(offset);

        let line_start = self.line_starts[line].to_usize();
        let column = self
            .text
            .get(line_start..offset.to_usize())
            .map_or(0, |prefix| prefix.chars().count());

        LineCol {
            line: u32::try_from(line + 1).unwrap_or(u32::MAX),
            column: u32::try_from(column + 1).unwrap_or(u32::MAX),
        }
    }

    /// One-based line number of a byte offset.
    #[must_use]
    pub fn line(&self, offset: TextSize) -> u32 {
        u32::try_from(self.line_index(offset) + 1).unwrap_or(u32::MAX)
    }

    fn line_index(&self, offset: TextSize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_unix_line_endings() {
        let index = LineIndex::new("line 1\nline 2\nline 3");

        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(1, 1));
        assert_eq!(index.line_col(TextSize::from(6)), LineCol::new(1, 7));
        assert_eq!(index.line_col(TextSize::from(7)), LineCol::new(2, 1));
        assert_eq!(index.line_col(TextSize::from(14)), LineCol::new(3, 1));
    }

    #[test]
    fn test_line_col_windows_line_endings() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.line_col(TextSize::from(3)), LineCol::new(2, 1));
    }

    #[test]
    fn test_line_col_counts_chars_not_bytes() {
        let index = LineIndex::new("café@");
        // 'é' is two bytes, '@' sits at byte 5
        assert_eq!(index.line_col(TextSize::from(5)), LineCol::new(1, 5));
    }

    #[test]
    fn test_line_col_empty_and_past_end() {
        let index = LineIndex::new("");
        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(1, 1));
        assert_eq!(index.line_col(TextSize::from(99)), LineCol::new(1, 1));
    }
}
