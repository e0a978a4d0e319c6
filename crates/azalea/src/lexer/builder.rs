use super::compiled::{CompiledLexer, CompiledRule, Matcher};
use super::config::{LexerConfig, MatchEngine};
use crate::automaton::{Automaton, subset_construction_with_limit};
use crate::error::{CompileError, PatternError};
use crate::regex;
use crate::syntax::SyntaxKind;
use compact_str::CompactString;
use smallvec::SmallVec;

/// One row of the lexer's rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule<K: SyntaxKind> {
    pub kind: K,
    /// Name used in compile errors and logs
    pub name: CompactString,
    pub pattern: CompactString,
    /// Higher wins when two rules match the same length
    pub priority: i32,
}

/// Collects token rules and compiles them into a [`CompiledLexer`].
///
/// Declaration order matters only as the last tie-break: between rules with
/// equal match length and equal priority, the one declared first wins.
#[derive(Debug, Clone)]
pub struct LexerBuilder<K: SyntaxKind> {
    rules: SmallVec<[TokenRule<K>; 16]>,
    config: LexerConfig,
}

impl<K: SyntaxKind> Default for LexerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SyntaxKind> LexerBuilder<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: SmallVec::new(),
            config: LexerConfig::default(),
        }
    }

    /// Add a rule named after the kind's [`SyntaxKind::name`].
    #[must_use]
    pub fn token(self, kind: K, pattern: &str, priority: i32) -> Self {
        let name = CompactString::from(kind.name());
        self.named_token(name, kind, pattern, priority)
    }

    #[must_use]
    pub fn named_token(mut self, name: impl Into<CompactString>, kind: K, pattern: &str, priority: i32) -> Self {
        self.rules.push(TokenRule {
            kind,
            name: name.into(),
            pattern: CompactString::new(pattern),
            priority,
        });
        self
    }

    #[must_use]
    pub fn config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn engine(mut self, engine: MatchEngine) -> Self {
        self.config.engine = engine;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[TokenRule<K>] {
        &self.rules
    }

    /// Compile every rule's pattern into its matcher.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NoRules`] for an empty table, or
    /// [`CompileError::Pattern`] naming the first rule whose pattern is
    /// malformed or exceeds the configured limits.
    pub fn build(self) -> Result<CompiledLexer<K>, CompileError> {
        if self.rules.is_empty() {
            return Err(CompileError::NoRules);
        }

        let rules = self
            .rules
            .into_iter()
            .map(|rule| compile_rule(rule, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("compiled {} token rules ({:?} engine)", rules.len(), self.config.engine);
        Ok(CompiledLexer::new(rules, self.config))
    }
}

fn compile_rule<K: SyntaxKind>(rule: TokenRule<K>, config: &LexerConfig) -> Result<CompiledRule<K>, CompileError> {
    let matcher = match build_matcher(&rule.pattern, config) {
        Ok(matcher) => matcher,
        Err(source) => {
            return Err(CompileError::Pattern {
                rule: rule.name,
                pattern: rule.pattern,
                source,
            });
        }
    };

    log::debug!(
        "rule {} `{}`: {} {} states",
        rule.name,
        rule.pattern,
        matcher.state_count(),
        matcher.engine_name()
    );

    Ok(CompiledRule {
        kind: rule.kind,
        name: rule.name,
        pattern: rule.pattern,
        priority: rule.priority,
        matcher,
    })
}

fn build_matcher(pattern: &str, config: &LexerConfig) -> Result<Matcher, PatternError> {
    let nfa = regex::compile_with(pattern, config)?;
    match config.engine {
        MatchEngine::Nfa => Ok(Matcher::Nfa(nfa)),
        MatchEngine::Dfa => {
            let limits = &config.limits;
            let alphabet = nfa.alphabet_len();
            if alphabet > limits.max_alphabet {
                // Both engines accept the same language, so wide classes keep the NFA
                log::debug!(
                    "pattern `{pattern}`: alphabet of {alphabet} characters exceeds {}, using the NFA",
                    limits.max_alphabet
                );
                return Ok(Matcher::Nfa(nfa));
            }
            let dfa = subset_construction_with_limit(&nfa, limits.max_dfa_states)
                .map_err(|err| PatternError::too_complex(err.to_string()))?;
            Ok(Matcher::Dfa(dfa))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatternErrorKind;
    use crate::lexer::CompileLimits;
    use crate::regex::ClassUniverse;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Ident,
        Number,
        Whitespace,
    }

    impl SyntaxKind for TestKind {
        fn is_trivia(self) -> bool {
            matches!(self, Self::Whitespace)
        }
    }

    #[test]
    fn test_lexer_builder_new() {
        let builder = LexerBuilder::<TestKind>::new();
        assert!(builder.rules().is_empty());
    }

    #[test]
    fn test_lexer_builder_token_order_and_name() {
        let builder = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+", 1)
            .named_token("NUM", TestKind::Number, r"\d+", 2);

        assert_eq!(builder.rules().len(), 2);
        assert_eq!(builder.rules()[0].name, "Ident");
        assert_eq!(builder.rules()[1].name, "NUM");
        assert_eq!(builder.rules()[1].priority, 2);
    }

    #[test]
    fn test_build_without_rules() {
        let err = LexerBuilder::<TestKind>::new().build().unwrap_err();
        assert!(matches!(err, CompileError::NoRules));
    }

    #[test]
    fn test_build_names_bad_rule() {
        let err = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+", 1)
            .token(TestKind::Number, "(0-9", 2)
            .build()
            .unwrap_err();

        match err {
            CompileError::Pattern { rule, pattern, source } => {
                assert_eq!(rule, "Number");
                assert_eq!(pattern, "(0-9");
                assert_eq!(source.kind, PatternErrorKind::UnclosedGroup);
            }
            CompileError::NoRules => panic!("expected a pattern error"),
        }
    }

    #[test]
    fn test_build_enforces_dfa_limit() {
        let config = LexerConfig {
            limits: CompileLimits {
                max_dfa_states: 3,
                ..CompileLimits::default()
            },
            ..LexerConfig::default()
        };
        let err = LexerBuilder::new()
            .token(TestKind::Ident, "abcdef", 1)
            .config(config.clone())
            .build()
            .unwrap_err();
        let source = err.pattern_error().unwrap();
        assert!(matches!(source.kind, PatternErrorKind::TooComplex { .. }));

        // The NFA engine has no DFA to bound
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "abcdef", 1)
            .config(config.with_engine(MatchEngine::Nfa))
            .build();
        assert!(lexer.is_ok());
    }

    #[test]
    fn test_wide_alphabet_falls_back_to_nfa() {
        let config = LexerConfig {
            limits: CompileLimits {
                max_alphabet: 10,
                ..CompileLimits::default()
            },
            ..LexerConfig::default()
        };
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+", 1)
            .token(TestKind::Number, "[0-9]", 2)
            .config(config)
            .build()
            .unwrap();

        assert_eq!(lexer.rules()[0].matcher.engine(), MatchEngine::Nfa);
        assert_eq!(lexer.rules()[1].matcher.engine(), MatchEngine::Dfa);
        assert_eq!(lexer.tokenize("abc7").unwrap().len(), 2);
    }

    #[test]
    fn test_unicode_universe_builds_with_dfa_engine() {
        let config = LexerConfig {
            universe: ClassUniverse::UNICODE,
            ..LexerConfig::default()
        };
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "[^ ]+", 1)
            .token(TestKind::Whitespace, " ", 0)
            .config(config)
            .build()
            .unwrap();

        assert_eq!(lexer.rules()[0].matcher.engine(), MatchEngine::Nfa);
        assert_eq!(lexer.rules()[1].matcher.engine(), MatchEngine::Dfa);
        let tokens = lexer.tokenize("café naïve").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "naïve");
    }
}
