//! # Lexer Module
//!
//! Maximal-munch tokenization over a table of regex rules.
//!
//! ## Overview
//!
//! Each rule pairs a token kind with a pattern and a priority. At every
//! position the scanner runs all rules anchored at the cursor and keeps:
//!
//! 1. the longest match,
//! 2. on equal length, the higher priority,
//! 3. on equal priority, the rule declared first.
//!
//! Matches of trivia kinds (see [`SyntaxKind::is_trivia`]) are consumed but
//! not emitted.
//!
//! ## Usage
//!
//! ```rust
//! use azalea::lexer::LexerBuilder;
//! use azalea::syntax::SyntaxKind;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Keyword,
//!     Ident,
//!     Whitespace,
//! }
//!
//! impl SyntaxKind for Kind {
//!     fn is_trivia(self) -> bool {
//!         matches!(self, Kind::Whitespace)
//!     }
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .token(Kind::Whitespace, r"\s+", 0)
//!     .token(Kind::Keyword, "is", 3)
//!     .token(Kind::Ident, "[a-z]+", 1)
//!     .build()?;
//!
//! let tokens = lexer.tokenize("isnow is").unwrap();
//! assert_eq!(tokens[0].kind, Kind::Ident);
//! assert_eq!(tokens[1].kind, Kind::Keyword);
//! # Ok::<(), azalea::error::CompileError>(())
//! ```
//!
//! ## Error Handling
//!
//! Malformed patterns fail in [`LexerBuilder::build`] with a
//! [`CompileError`](crate::error::CompileError). Unmatched input yields a
//! [`LexerError`](crate::error::LexerError); whether scanning stops there is
//! decided by [`ErrorMode`].
//!
//! [`SyntaxKind::is_trivia`]: crate::syntax::SyntaxKind::is_trivia

pub mod builder;
pub mod compiled;
pub mod config;
pub mod table;
pub mod token;

pub use builder::{LexerBuilder, TokenRule};
pub use compiled::{CompiledLexer, CompiledRule, Matcher, RuleMatch};
pub use config::{CompileLimits, ErrorMode, LexerConfig, MatchEngine};
pub use table::{NamedKind, TokenDef, TokenTable};
pub use token::{ScanOutput, Token};
