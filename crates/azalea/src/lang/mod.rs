//! # Reference Grammar
//!
//! Token set of the Azalea toy language, ready to scan.
//!
//! Whitespace and both comment forms are trivia. Priorities follow the
//! ranking string/char > keyword > decimal > operator, exponent, integer >
//! identifier, comments > whitespace.
//!
//! ```rust
//! use azalea::lang::{self, TokenType};
//!
//! let lexer = lang::lexer()?;
//! let tokens = lexer.tokenize("global x is 42").unwrap();
//! let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
//! assert_eq!(rendered, ["KEYWORD(global)", "IDENTIFIER(x)", "KEYWORD(is)", "INTEGER(42)"]);
//! assert_eq!(tokens[0].kind, TokenType::Keyword);
//! # Ok::<(), azalea::error::CompileError>(())
//! ```

pub mod symbols;

pub use symbols::{Scope, SymbolEntry, SymbolError, SymbolTable, ValueType};

use crate::error::CompileError;
use crate::lexer::{CompiledLexer, LexerBuilder, LexerConfig};
use crate::regex::ClassUniverse;
use crate::syntax::SyntaxKind;
use std::fmt;

/// Token kinds of the reference grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TokenType {
    Whitespace,
    MultiLineComment,
    SingleLineComment,
    StringOrChar,
    Keyword,
    Exponent,
    Operator,
    Decimal,
    Integer,
    Identifier,
}

impl TokenType {
    /// Every kind, in rule declaration order.
    pub const ALL: [Self; 10] = [
        Self::Whitespace,
        Self::MultiLineComment,
        Self::SingleLineComment,
        Self::StringOrChar,
        Self::Keyword,
        Self::Exponent,
        Self::Operator,
        Self::Decimal,
        Self::Integer,
        Self::Identifier,
    ];

    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Whitespace => "[ \t\n\r\x0c]+",
            Self::MultiLineComment => "<<([^>]|>[^>])*>>",
            Self::SingleLineComment => "<[^>]*>",
            Self::StringOrChar => r"\{[^{}]*\}",
            Self::Keyword => "(global|local|tell|ask|is|now|true|false)",
            Self::Exponent => r"\^",
            Self::Operator => r"[+\-*/%]",
            Self::Decimal => r"[+\-]?(\d+\.\d{1,5}|\.\d{1,5})([eE][+\-]?\d+)?",
            Self::Integer => r"[+\-]?\d+",
            Self::Identifier => "[a-z]+",
        }
    }

    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::Whitespace => 0,
            Self::MultiLineComment | Self::SingleLineComment | Self::Identifier => 1,
            Self::Exponent | Self::Operator | Self::Integer => 2,
            Self::Decimal => 3,
            Self::Keyword => 4,
            Self::StringOrChar => 5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whitespace => "WHITESPACE",
            Self::MultiLineComment => "MULTI_LINE_COMMENT",
            Self::SingleLineComment => "SINGLE_LINE_COMMENT",
            Self::StringOrChar => "STRING_OR_CHAR",
            Self::Keyword => "KEYWORD",
            Self::Exponent => "EXPONENT",
            Self::Operator => "OPERATOR",
            Self::Decimal => "DECIMAL",
            Self::Integer => "INTEGER",
            Self::Identifier => "IDENTIFIER",
        }
    }
}

impl SyntaxKind for TokenType {
    fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::MultiLineComment | Self::SingleLineComment)
    }

    fn name(self) -> String {
        self.as_str().to_owned()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of the reference lexer.
///
/// Strings and comments may hold any character, so `.` and negated classes
/// range over all of Unicode. Rules whose alphabet is too wide for a DFA are
/// matched by their NFA.
#[must_use]
pub fn config() -> LexerConfig {
    LexerConfig {
        universe: ClassUniverse::UNICODE,
        ..LexerConfig::default()
    }
}

/// The reference lexer with [`config`].
///
/// # Errors
///
/// Does not fail under the default limits; see [`lexer_with_config`].
pub fn lexer() -> Result<CompiledLexer<TokenType>, CompileError> {
    lexer_with_config(config())
}

/// The reference lexer with a caller-chosen configuration.
///
/// # Errors
///
/// Returns a [`CompileError`] if `config` limits reject one of the patterns.
pub fn lexer_with_config(config: LexerConfig) -> Result<CompiledLexer<TokenType>, CompileError> {
    TokenType::ALL
        .into_iter()
        .fold(LexerBuilder::new(), |builder, kind| {
            builder.token(kind, kind.pattern(), kind.priority())
        })
        .config(config)
        .build()
}
