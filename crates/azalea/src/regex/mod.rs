//! # Regex Module
//!
//! Pattern syntax and its compilation to an [`Nfa`].
//!
//! ## Syntax
//!
//! | pattern | meaning |
//! |---|---|
//! | `a` | literal character |
//! | `\d` `\w` `\s` | digit, word character, whitespace |
//! | `\t` `\n` `\r` `\f` `\v` `\0` | control characters |
//! | `\*`, `\(` ... | escaped punctuation is literal |
//! | `[a-z_]`, `[^>]` | bracket class, optionally negated |
//! | `.` | any character of the [`ClassUniverse`] |
//! | `ab`, `a\|b` | concatenation, union |
//! | `a*` `a+` `a?` | zero or more, one or more, optional |
//! | `a{3}` `a{2,}` `a{1,5}` | bounded repetition |
//! | `(ab)` | grouping |
//!
//! A `{` that does not open a well-formed quantifier is a literal.
//! Backreferences, lookaround and anchors are not supported; `\1` and other
//! alphanumeric escapes are rejected.
//!
//! ## Usage
//!
//! ```rust
//! use azalea::regex;
//!
//! let nfa = regex::compile(r"[+\-]?\d+")?;
//! assert!(nfa.matches("-42"));
//! assert!(!nfa.matches("4a"));
//! # Ok::<(), azalea::error::PatternError>(())
//! ```

pub mod class;
pub mod parser;

pub use class::{CharClass, ClassUniverse};
pub use parser::{Parser, REPEAT_LIMIT, RegexToken, RegexTokenKind};

use crate::automaton::{thompson, Nfa};
use crate::error::{PatternError, PatternErrorKind, PatternResult};
use crate::lexer::LexerConfig;

/// Postfix token stream of `pattern` under the default configuration.
///
/// # Errors
///
/// Returns a [`PatternError`] if the pattern is malformed.
pub fn parse(pattern: &str) -> PatternResult<Vec<RegexToken>> {
    parse_with(pattern, &LexerConfig::default())
}

/// Postfix token stream of `pattern`, honoring the configured universe and
/// pattern length limit.
///
/// # Errors
///
/// Returns a [`PatternError`] if the pattern is malformed or too long.
pub fn parse_with(pattern: &str, config: &LexerConfig) -> PatternResult<Vec<RegexToken>> {
    let max_len = config.limits.max_pattern_len;
    if pattern.chars().count() > max_len {
        return Err(PatternError::new(max_len, PatternErrorKind::TooComplex {
            reason: format!("pattern longer than {max_len} characters"),
        }));
    }
    Parser::new(pattern, config.universe).parse()
}

/// Thompson NFA for `pattern` under the default configuration.
///
/// # Errors
///
/// Returns a [`PatternError`] if the pattern is malformed.
pub fn compile(pattern: &str) -> PatternResult<Nfa> {
    compile_with(pattern, &LexerConfig::default())
}

/// Thompson NFA for `pattern`, bounded by `config.limits`.
///
/// # Errors
///
/// Returns a [`PatternError`] if the pattern is malformed or its automaton
/// exceeds the NFA state limit.
pub fn compile_with(pattern: &str, config: &LexerConfig) -> PatternResult<Nfa> {
    let postfix = parse_with(pattern, config)?;
    thompson::build(&postfix, config.limits.max_nfa_states)
}
