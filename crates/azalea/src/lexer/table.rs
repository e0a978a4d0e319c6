//! Token sets defined at runtime by name.
//!
//! A [`TokenTable`] is plain data, so it can be written by hand, generated,
//! or (with the `serialize` feature) loaded from JSON. Compiling it yields a
//! lexer over [`NamedKind`], an index into the table.

use super::builder::LexerBuilder;
use super::compiled::CompiledLexer;
use super::config::LexerConfig;
use super::token::Token;
use crate::error::CompileError;
use crate::syntax::SyntaxKind;
use compact_str::CompactString;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One named token definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TokenDef {
    pub name: CompactString,
    pub pattern: CompactString,
    #[cfg_attr(feature = "serialize", serde(default))]
    pub priority: i32,
    /// Consume matches without emitting them
    #[cfg_attr(feature = "serialize", serde(default))]
    pub skip: bool,
}

/// Kind of a token produced by a table-driven lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedKind {
    index: u32,
    skip: bool,
}

impl NamedKind {
    /// Position of the definition in its table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl SyntaxKind for NamedKind {
    fn is_trivia(self) -> bool {
        self.skip
    }

    fn name(self) -> String {
        format!("#{}", self.index)
    }
}

/// Ordered list of named token definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct TokenTable {
    tokens: Vec<TokenDef>,
}

impl TokenTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitted token.
    #[must_use]
    pub fn token(mut self, name: &str, pattern: &str, priority: i32) -> Self {
        self.push(TokenDef {
            name: name.into(),
            pattern: pattern.into(),
            priority,
            skip: false,
        });
        self
    }

    /// Add a token that is consumed but never emitted.
    #[must_use]
    pub fn skip(mut self, name: &str, pattern: &str, priority: i32) -> Self {
        self.push(TokenDef {
            name: name.into(),
            pattern: pattern.into(),
            priority,
            skip: true,
        });
        self
    }

    pub fn push(&mut self, def: TokenDef) {
        self.tokens.push(def);
    }

    #[must_use]
    pub fn definitions(&self) -> &[TokenDef] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Name of the definition a kind points at.
    #[must_use]
    pub fn name(&self, kind: NamedKind) -> Option<&str> {
        self.tokens.get(kind.index()).map(|def| def.name.as_str())
    }

    /// Kind of the first definition called `name`.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<NamedKind> {
        self.tokens
            .iter()
            .position(|def| def.name == name)
            .map(|index| Self::kind_at(index, &self.tokens[index]))
    }

    // Tables are bounded far below u32::MAX definitions
    #[allow(clippy::cast_possible_truncation)]
    const fn kind_at(index: usize, def: &TokenDef) -> NamedKind {
        NamedKind {
            index: index as u32,
            skip: def.skip,
        }
    }

    /// Render a token as `NAME(text)`.
    #[must_use]
    pub fn describe(&self, token: &Token<NamedKind>) -> String {
        format!("{}({})", self.name(token.kind).unwrap_or("?"), token.text)
    }

    /// Compile the table with `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] naming the first definition that fails.
    pub fn compile(&self, config: &LexerConfig) -> Result<CompiledLexer<NamedKind>, CompileError> {
        self.tokens
            .iter()
            .enumerate()
            .fold(LexerBuilder::new(), |builder, (index, def)| {
                builder.named_token(def.name.clone(), Self::kind_at(index, def), &def.pattern, def.priority)
            })
            .config(config.clone())
            .build()
    }
}
