//! Symbol table fed by constant bindings in a token stream.
//!
//! A binding is the four-token sequence
//! `KEYWORD(global|local) IDENTIFIER KEYWORD(is) (INTEGER|DECIMAL|STRING_OR_CHAR)`.

use super::TokenType;
use crate::lexer::Token;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Local,
}

/// Type of a bound value, taken from the literal's token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Decimal,
    StringOrChar,
}

impl ValueType {
    #[must_use]
    pub const fn of(kind: TokenType) -> Option<Self> {
        match kind {
            TokenType::Integer => Some(Self::Integer),
            TokenType::Decimal => Some(Self::Decimal),
            TokenType::StringOrChar => Some(Self::StringOrChar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: CompactString,
    pub value_type: ValueType,
    pub value: CompactString,
    pub scope: Scope,
    /// Constants refuse [`SymbolTable::update`]
    pub constant: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Symbol '{name}' is already defined")]
    Duplicate { name: CompactString },

    #[error("Symbol '{name}' is not defined")]
    Undefined { name: CompactString },

    #[error("Symbol '{name}' is a constant")]
    Constant { name: CompactString },
}

/// Linear list of symbols, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`SymbolError::Duplicate`] if the name is taken.
    pub fn add(&mut self, entry: SymbolEntry) -> Result<(), SymbolError> {
        if self.exists(&entry.name) {
            return Err(SymbolError::Duplicate { name: entry.name });
        }
        self.entries.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Replace the value of a non-constant symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Undefined`] for an unknown name and
    /// [`SymbolError::Constant`] for a constant.
    pub fn update(&mut self, name: &str, value: impl Into<CompactString>) -> Result<(), SymbolError> {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) else {
            return Err(SymbolError::Undefined { name: name.into() });
        };
        if entry.constant {
            return Err(SymbolError::Constant { name: name.into() });
        }
        entry.value = value.into();
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a constant for every binding in `tokens`.
    ///
    /// Returns how many bindings were added.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Duplicate`] when a name is bound twice.
    pub fn populate(&mut self, tokens: &[Token<TokenType>]) -> Result<usize, SymbolError> {
        let mut added = 0;
        let mut i = 0;
        while i < tokens.len() {
            match binding(&tokens[i..]) {
                Some(entry) => {
                    log::trace!("binding {} = {}", entry.name, entry.value);
                    self.add(entry)?;
                    added += 1;
                    i += 4;
                }
                None => i += 1,
            }
        }
        Ok(added)
    }
}

fn binding(window: &[Token<TokenType>]) -> Option<SymbolEntry> {
    let [scope, name, is, value, ..] = window else {
        return None;
    };

    let scope = match (scope.kind, scope.text.as_str()) {
        (TokenType::Keyword, "global") => Scope::Global,
        (TokenType::Keyword, "local") => Scope::Local,
        _ => return None,
    };
    if name.kind != TokenType::Identifier || is.kind != TokenType::Keyword || is.text != "is" {
        return None;
    }

    Some(SymbolEntry {
        name: name.text.clone(),
        value_type: ValueType::of(value.kind)?,
        value: value.text.clone(),
        scope,
        constant: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang;

    fn populated(source: &str) -> Result<SymbolTable, SymbolError> {
        let tokens = lang::lexer().unwrap().tokenize(source).unwrap();
        let mut table = SymbolTable::new();
        table.populate(&tokens)?;
        Ok(table)
    }

    #[test]
    fn test_populate_records_bindings() {
        let table = populated("global x is 42 local pi is 3.14 tell x global s is {hey}").unwrap();
        assert_eq!(table.len(), 3);

        let x = table.get("x").unwrap();
        assert_eq!(x.scope, Scope::Global);
        assert_eq!(x.value_type, ValueType::Integer);
        assert_eq!(x.value, "42");
        assert!(x.constant);

        assert_eq!(table.get("pi").unwrap().value_type, ValueType::Decimal);
        assert_eq!(table.get("pi").unwrap().scope, Scope::Local);
        assert_eq!(table.get("s").unwrap().value, "{hey}");
    }

    #[test]
    fn test_populate_ignores_incomplete_bindings() {
        let table = populated("global x is y tell global is 4 local z").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_populate_rejects_rebinding() {
        let err = populated("global x is 1 local x is 2").unwrap_err();
        assert_eq!(err, SymbolError::Duplicate { name: "x".into() });
    }

    #[test]
    fn test_update_refuses_constants() {
        let mut table = populated("global x is 1").unwrap();
        assert_eq!(table.update("x", "2"), Err(SymbolError::Constant { name: "x".into() }));
        assert_eq!(table.update("y", "2"), Err(SymbolError::Undefined { name: "y".into() }));

        table
            .add(SymbolEntry {
                name: "n".into(),
                value_type: ValueType::Integer,
                value: "0".into(),
                scope: Scope::Local,
                constant: false,
            })
            .unwrap();
        table.update("n", "5").unwrap();
        assert_eq!(table.get("n").unwrap().value, "5");
        assert!(table.exists("n"));
    }
}
