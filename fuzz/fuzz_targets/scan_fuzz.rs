#![no_main]
use azalea::lang::{self, TokenType};
use azalea::lexer::{CompiledLexer, ErrorMode, LexerConfig, MatchEngine};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

fn recovering() -> LexerConfig {
    LexerConfig {
        error_mode: ErrorMode::Recover,
        ..lang::config()
    }
}

static DFA: LazyLock<CompiledLexer<TokenType>> =
    LazyLock::new(|| lang::lexer_with_config(recovering()).unwrap());
static NFA: LazyLock<CompiledLexer<TokenType>> =
    LazyLock::new(|| lang::lexer_with_config(recovering().with_engine(MatchEngine::Nfa)).unwrap());

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let dfa = DFA.scan(source);
    let nfa = NFA.scan(source);
    assert_eq!(dfa.tokens, nfa.tokens);
    assert_eq!(dfa.errors, nfa.errors);

    for token in &dfa.tokens {
        assert_eq!(token.range.slice(source), Some(token.text.as_str()));
    }
});
