//! # Azalea
//!
//! A regex-to-automaton lexer toolkit.
//!
//! ## Overview
//!
//! Azalea compiles token patterns through the classic pipeline:
//!
//! 1. [`regex`] parses a pattern and reorders it to postfix.
//! 2. [`automaton::thompson`] builds a Thompson NFA from the postfix stream.
//! 3. [`automaton::subset_construction`] determinizes the NFA.
//! 4. [`lexer`] scans input with maximal munch over one automaton per rule.
//!
//! [`lang`] ships the token set of the Azalea toy language on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use azalea::lexer::{ErrorMode, LexerBuilder, LexerConfig};
//! use azalea::syntax::SyntaxKind;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Number,
//!     Plus,
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
//!     .token(Kind::Number, r"\d+(\.\d+)?", 2)
//!     .token(Kind::Plus, r"\+", 1)
//!     .token(Kind::Whitespace, r"\s+", 0)
//!     .config(LexerConfig {
//!         error_mode: ErrorMode::Recover,
//!         ..LexerConfig::default()
//!     })
//!     .build()?;
//!
//! let output = lexer.scan("1.5 + 2 ? 3");
//! let kinds: Vec<Kind> = output.tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [Kind::Number, Kind::Plus, Kind::Number, Kind::Number]);
//! assert_eq!(output.errors[0].offset(), 8);
//! # Ok::<(), azalea::error::CompileError>(())
//! ```
//!
//! ## Modules
//!
//! - [`regex`] - Pattern syntax, character classes, postfix conversion
//! - [`automaton`] - NFA, DFA, Thompson and subset construction
//! - [`lexer`] - Rule tables, configuration and the scanner
//! - [`lang`] - Reference grammar and symbol table
//! - [`syntax`] - Token kinds, spans and line lookup
//! - [`error`] - Error types and diagnostics
//!
//! ## Features
//!
//! - `diagnostics`: `miette` integration for errors
//! - `serialize`: serde support for configs, token tables and tokens

pub mod automaton;
pub mod error;
pub mod lang;
pub mod lexer;
pub mod regex;
pub mod syntax;

// Re-export commonly used types
pub use automaton::{Automaton, Dfa, Nfa, StateId, subset_construction};
pub use error::{CompileError, LexerError, PatternError};
pub use lexer::{CompiledLexer, LexerBuilder, LexerConfig, Token};
pub use syntax::{SyntaxKind, TextRange, TextSize};
