use super::config::{ErrorMode, LexerConfig, MatchEngine};
use super::token::{ScanOutput, Token};
use crate::automaton::{Automaton, Dfa, Nfa};
use crate::error::{LexerError, LexerErrorKind};
use crate::syntax::{LineIndex, SyntaxKind, TextRange, TextSize};
use compact_str::CompactString;

/// Compiled automaton of one rule.
#[derive(Debug, Clone)]
pub enum Matcher {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Matcher {
    #[must_use]
    pub const fn engine(&self) -> MatchEngine {
        match self {
            Self::Nfa(_) => MatchEngine::Nfa,
            Self::Dfa(_) => MatchEngine::Dfa,
        }
    }

    pub(crate) const fn engine_name(&self) -> &'static str {
        match self {
            Self::Nfa(_) => "NFA",
            Self::Dfa(_) => "DFA",
        }
    }
}

impl Automaton for Matcher {
    fn accepts(&self, input: &str) -> bool {
        match self {
            Self::Nfa(nfa) => nfa.matches(input),
            Self::Dfa(dfa) => dfa.accepts(input),
        }
    }

    fn longest_match(&self, input: &str) -> Option<usize> {
        match self {
            Self::Nfa(nfa) => nfa.longest_match(input),
            Self::Dfa(dfa) => dfa.longest_match(input),
        }
    }

    fn state_count(&self) -> usize {
        match self {
            Self::Nfa(nfa) => nfa.len(),
            Self::Dfa(dfa) => dfa.len(),
        }
    }
}

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule<K: SyntaxKind> {
    pub kind: K,
    pub name: CompactString,
    pub pattern: CompactString,
    pub priority: i32,
    pub matcher: Matcher,
}

/// Winning rule at one cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<K> {
    pub kind: K,
    /// Index of the rule in declaration order
    pub rule: usize,
    /// Matched length in bytes, never zero
    pub len: usize,
}

/// Maximal-munch scanner over a fixed rule table.
///
/// Immutable after [`LexerBuilder::build`](super::LexerBuilder::build), so one
/// instance can scan any number of inputs, from any number of threads.
#[derive(Debug, Clone)]
pub struct CompiledLexer<K: SyntaxKind> {
    rules: Vec<CompiledRule<K>>,
    config: LexerConfig,
}

impl<K: SyntaxKind> CompiledLexer<K> {
    pub(crate) const fn new(rules: Vec<CompiledRule<K>>, config: LexerConfig) -> Self {
        Self { rules, config }
    }

    #[must_use]
    pub fn rules(&self) -> &[CompiledRule<K>] {
        &self.rules
    }

    #[must_use]
    pub const fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// The rule that wins at byte offset `pos` of `input`.
    ///
    /// Every rule is matched anchored at `pos`. The longest match wins, a
    /// length tie goes to the higher priority, and a full tie to the rule
    /// declared first. Empty matches never win.
    #[must_use]
    pub fn match_at(&self, input: &str, pos: usize) -> Option<RuleMatch<K>> {
        let rest = input.get(pos..)?;
        let mut best: Option<(RuleMatch<K>, i32)> = None;

        for (index, rule) in self.rules.iter().enumerate() {
            let Some(len) = rule.matcher.longest_match(rest) else {
                continue;
            };
            if len == 0 {
                continue;
            }

            let better = match &best {
                None => true,
                Some((current, priority)) => len > current.len || (len == current.len && rule.priority > *priority),
            };
            if better {
                best = Some((
                    RuleMatch {
                        kind: rule.kind,
                        rule: index,
                        len,
                    },
                    rule.priority,
                ));
            }
        }

        best.map(|(found, _)| found)
    }

    /// Tokenize `input`, reporting tokens and errors together.
    ///
    /// In [`ErrorMode::Abort`] the scan stops at the first unmatched
    /// character and `tokens` holds what came before it. In
    /// [`ErrorMode::Recover`] the character is skipped and scanning goes on
    /// until `max_errors` is reached.
    #[must_use]
    pub fn scan(&self, input: &str) -> ScanOutput<K> {
        let index = LineIndex::new(input);
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            if let Some(found) = self.match_at(input, pos) {
                let end = pos + found.len;
                if !found.kind.is_trivia() {
                    let token = Token::new(
                        found.kind,
                        &input[pos..end],
                        TextRange::at_offset(pos, found.len),
                        index.line(TextSize::of(pos)),
                    );
                    log::trace!("token {token} at {}", token.range);
                    tokens.push(token);
                }
                pos = end;
                continue;
            }

            let Some(c) = input[pos..].chars().next() else {
                break;
            };
            let at = index.line_col(TextSize::of(pos));
            let error = LexerError::new(
                TextRange::at_offset(pos, c.len_utf8()),
                at.line,
                at.column,
                LexerErrorKind::UnexpectedChar { char: c },
            );
            log::debug!("{error}");
            errors.push(error);

            match self.config.error_mode {
                ErrorMode::Abort => break,
                ErrorMode::Recover => {
                    pos += c.len_utf8();
                    let limit = self.config.max_errors.max(1);
                    if errors.len() >= limit && pos < input.len() {
                        let at = index.line_col(TextSize::of(pos));
                        errors.push(LexerError::new(
                            TextRange::at_offset(pos, 0),
                            at.line,
                            at.column,
                            LexerErrorKind::TooManyErrors {
                                limit,
                            },
                        ));
                        break;
                    }
                }
            }
        }

        ScanOutput { tokens, errors }
    }

    /// Tokenize the input string using maximal munch.
    ///
    /// # Errors
    ///
    /// Returns the lexer errors if any character could not be matched.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token<K>>, Vec<LexerError>> {
        self.scan(input).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexerBuilder;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Keyword,
        Ident,
        Number,
        Plus,
        Whitespace,
    }

    impl SyntaxKind for TestKind {
        fn is_trivia(self) -> bool {
            matches!(self, Self::Whitespace)
        }
    }

    fn lexer(config: LexerConfig) -> CompiledLexer<TestKind> {
        LexerBuilder::new()
            .token(TestKind::Whitespace, "[ \t\n]+", 0)
            .token(TestKind::Keyword, "(is|now)", 3)
            .token(TestKind::Ident, "[a-z]+", 1)
            .token(TestKind::Number, r"\d+", 2)
            .token(TestKind::Plus, r"\+", 2)
            .config(config)
            .build()
            .unwrap()
    }

    fn kinds(tokens: &[Token<TestKind>]) -> Vec<TestKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_longest_match_beats_priority() {
        let tokens = lexer(LexerConfig::default()).tokenize("isnow").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TestKind::Ident);
        assert_eq!(tokens[0].text, "isnow");
    }

    #[test]
    fn test_priority_breaks_length_tie() {
        let tokens = lexer(LexerConfig::default()).tokenize("is x").unwrap();
        assert_eq!(kinds(&tokens), vec![TestKind::Keyword, TestKind::Ident]);
    }

    #[test]
    fn test_declaration_order_breaks_full_tie() {
        let lexer = LexerBuilder::new()
            .token(TestKind::Number, "[0-9]", 1)
            .token(TestKind::Ident, "[0-9]", 1)
            .build()
            .unwrap();
        let found = lexer.match_at("7", 0).unwrap();
        assert_eq!(found.kind, TestKind::Number);
        assert_eq!(found.rule, 0);
    }

    #[test]
    fn test_trivia_is_consumed_not_emitted() {
        let tokens = lexer(LexerConfig::default()).tokenize("  1 +\n 2 ").unwrap();
        assert_eq!(kinds(&tokens), vec![TestKind::Number, TestKind::Plus, TestKind::Number]);
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[2].range, TextRange::at_offset(7, 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(lexer(LexerConfig::default()).tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_zero_length_rule_never_wins() {
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]*", 1)
            .build()
            .unwrap();
        let output = lexer.scan("ab1");
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].offset(), 2);
    }

    #[test]
    fn test_abort_keeps_tokens_before_error() {
        let output = lexer(LexerConfig::default()).scan("1 + @ 2");
        assert_eq!(kinds(&output.tokens), vec![TestKind::Number, TestKind::Plus]);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].offset(), 4);
        assert_eq!(output.errors[0].column, 5);
    }

    #[test]
    fn test_recover_collects_errors() {
        let output = lexer(LexerConfig::recovering()).scan("1 @ 2 # 3");
        assert_eq!(kinds(&output.tokens), vec![TestKind::Number, TestKind::Number, TestKind::Number]);
        let offsets: Vec<usize> = output.errors.iter().map(LexerError::offset).collect();
        assert_eq!(offsets, vec![2, 6]);
    }

    #[test]
    fn test_recover_stops_at_max_errors() {
        let config = LexerConfig {
            max_errors: 2,
            ..LexerConfig::recovering()
        };
        let output = lexer(config).scan("@@@@ 1");
        assert_eq!(output.errors.len(), 3);
        assert_eq!(output.errors[2].kind, LexerErrorKind::TooManyErrors { limit: 2 });
        assert!(output.tokens.is_empty());
    }

    #[test]
    fn test_zero_max_errors_reports_effective_limit() {
        let config = LexerConfig {
            max_errors: 0,
            ..LexerConfig::recovering()
        };
        let output = lexer(config).scan("@@ 1");
        assert_eq!(output.errors.len(), 2);
        assert_eq!(output.errors[1].kind, LexerErrorKind::TooManyErrors { limit: 1 });
    }

    #[test]
    fn test_engines_agree() {
        let input = "now is 12 + abc\n+ 7";
        let nfa = lexer(LexerConfig::default().with_engine(MatchEngine::Nfa)).tokenize(input).unwrap();
        let dfa = lexer(LexerConfig::default()).tokenize(input).unwrap();
        assert_eq!(nfa, dfa);
    }

    #[test]
    fn test_multibyte_error_span() {
        let err = lexer(LexerConfig::default()).tokenize("ab é").unwrap_err();
        assert_eq!(err[0].span, TextRange::at_offset(3, 2));
        assert_eq!(err[0].kind, LexerErrorKind::UnexpectedChar { char: 'é' });
    }

    #[test]
    fn test_lexer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledLexer<TestKind>>();
    }
}
