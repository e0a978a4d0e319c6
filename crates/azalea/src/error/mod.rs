//! # Error Types
//!
//! Errors raised while compiling token patterns and while scanning input.
//!
//! ## Overview
//!
//! The two classes are disjoint:
//!
//! - **Compile time**: [`PatternError`] for a malformed regex, wrapped in
//!   [`CompileError`] by [`LexerBuilder::build`](crate::lexer::LexerBuilder::build)
//!   so the offending rule is named. A bad pattern is a configuration defect;
//!   it is reported before any input is scanned and never retried.
//! - **Scan time**: [`LexerError`] when no rule matches at the cursor. It
//!   carries the byte span plus a one-based line and column.
//!
//! ## Usage
//!
//! ```rust
//! use azalea::error::PatternErrorKind;
//! use azalea::regex::parse;
//!
//! let err = parse("(ab").unwrap_err();
//! assert_eq!(err.offset, 0);
//! assert!(matches!(err.kind, PatternErrorKind::UnclosedGroup));
//! ```
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with [`miette`]
//! for rich error reporting with source code snippets.

use crate::syntax::TextRange;
use compact_str::CompactString;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

pub type PatternResult<T> = Result<T, PatternError>;

/// A malformed regex pattern.
///
/// `offset` is the character index of the offending token in the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{kind} at offset {offset}")]
pub struct PatternError {
    pub offset: usize,
    #[source]
    #[cfg_attr(feature = "diagnostics", diagnostic_source)]
    pub kind: PatternErrorKind,
}

/// Types of pattern errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum PatternErrorKind {
    #[error("Empty pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::empty)))]
    EmptyPattern,

    #[error("Unmatched ')'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unmatched_paren)))]
    UnmatchedParen,

    #[error("Unclosed group")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unclosed_group)))]
    UnclosedGroup,

    #[error("Empty group")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::empty_group)))]
    EmptyGroup,

    #[error("Unterminated character class")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unterminated_class)))]
    UnterminatedClass,

    #[error("Empty character class")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::empty_class)))]
    EmptyClass,

    #[error("Invalid class range '{lo}-{hi}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::invalid_range)))]
    InvalidRange { lo: char, hi: char },

    #[error("Invalid escape sequence: \\{escape}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::invalid_escape)))]
    InvalidEscape { escape: char },

    #[error("Dangling escape at end of pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::dangling_escape)))]
    DanglingEscape,

    #[error("Invalid repetition: {reason}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::invalid_repetition)))]
    InvalidRepetition { reason: String },

    #[error("Operator '{operator}' is missing an operand")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::missing_operand)))]
    MissingOperand { operator: CompactString },

    #[error("Pattern is too complex: {reason}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::too_complex)))]
    TooComplex { reason: String },
}

impl PatternError {
    #[must_use]
    pub const fn new(offset: usize, kind: PatternErrorKind) -> Self {
        Self { offset, kind }
    }

    #[must_use]
    pub fn too_complex(reason: impl Into<String>) -> Self {
        Self::new(0, PatternErrorKind::TooComplex { reason: reason.into() })
    }
}

/// Failure to build a lexer from its rule table.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum CompileError {
    #[error("Invalid pattern `{pattern}` for token {rule}: {source}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::invalid_pattern)))]
    Pattern {
        rule: CompactString,
        pattern: CompactString,
        #[source]
        source: PatternError,
    },

    #[error("Lexer has no token rules")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::no_rules)))]
    NoRules,
}

impl CompileError {
    /// The underlying pattern error, if any.
    #[must_use]
    pub const fn pattern_error(&self) -> Option<&PatternError> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            Self::NoRules => None,
        }
    }
}

/// Lexer error with location information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{kind} at line {line}, column {column}")]
pub struct LexerError {
    #[cfg_attr(feature = "diagnostics", label)]
    pub span: TextRange,
    pub line: u32,
    pub column: u32,
    #[source]
    pub kind: LexerErrorKind,
}

/// Types of lexer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum LexerErrorKind {
    #[error("Unexpected character: '{char}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::unexpected_char)))]
    UnexpectedChar { char: char },

    #[error("Too many errors (limit {limit}), scan aborted")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::too_many_errors)))]
    TooManyErrors { limit: usize },
}

impl LexerError {
    #[must_use]
    pub const fn new(span: TextRange, line: u32, column: u32, kind: LexerErrorKind) -> Self {
        Self {
            span,
            line,
            column,
            kind,
        }
    }

    /// Byte offset where the error starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start().to_usize()
    }

    #[must_use]
    pub const fn kind(&self) -> &LexerErrorKind {
        &self.kind
    }
}

/// Subset construction produced more DFA states than its budget allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("DFA exceeds {limit} states")]
pub struct StateLimitExceeded {
    pub limit: usize,
}
