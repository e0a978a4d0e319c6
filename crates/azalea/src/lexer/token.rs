use crate::error::LexerError;
use crate::syntax::{SyntaxKind, TextRange};
use compact_str::CompactString;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token produced by the lexer.
///
/// Trivia kinds never become tokens; everything else the scanner matched is
/// kept with its exact source text.
///
/// # Example
///
/// ```rust
/// use azalea::lexer::Token;
/// use azalea::syntax::{SyntaxKind, TextRange};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind { Number }
/// impl SyntaxKind for Kind {
///     fn is_trivia(self) -> bool { false }
/// }
///
/// let token = Token::new(Kind::Number, "42", TextRange::at_offset(0, 2), 1);
/// assert_eq!(token.to_string(), "Number(42)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Token<K: SyntaxKind> {
    /// The rule that won at this position
    pub kind: K,
    /// The matched source text
    pub text: CompactString,
    /// Byte span in the scanned input
    pub range: TextRange,
    /// One-based line of the first byte
    pub line: u32,
}

impl<K: SyntaxKind> Token<K> {
    #[must_use]
    pub fn new(kind: K, text: impl Into<CompactString>, range: TextRange, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
            line,
        }
    }

    /// Byte offset of the first character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.range.start().to_usize()
    }
}

impl<K: SyntaxKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.text)
    }
}

/// Tokens and errors of one scan, side by side.
///
/// In abort mode `tokens` holds everything emitted before the first error.
#[derive(Debug, Clone)]
pub struct ScanOutput<K: SyntaxKind> {
    pub tokens: Vec<Token<K>>,
    pub errors: Vec<LexerError>,
}

impl<K: SyntaxKind> ScanOutput<K> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Tokens when the scan was clean, otherwise the errors.
    ///
    /// # Errors
    ///
    /// Returns the collected errors if any were recorded.
    pub fn into_result(self) -> Result<Vec<Token<K>>, Vec<LexerError>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}
