use crate::regex::ClassUniverse;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Which automaton a compiled rule walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum MatchEngine {
    /// Direct NFA simulation over active state sets
    Nfa,
    /// Walk of the subset-constructed DFA
    #[default]
    Dfa,
}

/// What the scanner does at a character no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum ErrorMode {
    /// Stop at the first unmatched character
    #[default]
    Abort,
    /// Record the error, skip one character and keep scanning
    Recover,
}

/// Complexity bounds enforced while compiling patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct CompileLimits {
    /// Longest accepted pattern, in characters
    pub max_pattern_len: usize,

    /// Largest Thompson NFA per rule
    pub max_nfa_states: usize,

    /// Largest subset-constructed DFA per rule
    pub max_dfa_states: usize,

    /// Most distinct characters a DFA may be built over
    pub max_alphabet: usize,
}

impl Default for CompileLimits {
    fn default() -> Self {
        Self {
            max_pattern_len: 4096,
            max_nfa_states: 10_000,
            max_dfa_states: 10_000,
            max_alphabet: 4096,
        }
    }
}

/// Configuration for the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct LexerConfig {
    /// Matcher used by every rule
    pub engine: MatchEngine,

    /// Abort on the first error, or recover and collect
    pub error_mode: ErrorMode,

    /// Maximum number of errors before giving up in recover mode
    pub max_errors: usize,

    pub limits: CompileLimits,

    /// Domain of `.` and negated classes
    pub universe: ClassUniverse,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            engine: MatchEngine::Dfa,
            error_mode: ErrorMode::Abort,
            max_errors: 100,
            limits: CompileLimits::default(),
            universe: ClassUniverse::ASCII,
        }
    }
}

impl LexerConfig {
    /// Default configuration with error recovery switched on.
    #[must_use]
    pub fn recovering() -> Self {
        Self {
            error_mode: ErrorMode::Recover,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: MatchEngine) -> Self {
        self.engine = engine;
        self
    }
}
