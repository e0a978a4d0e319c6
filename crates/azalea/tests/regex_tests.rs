//! Tests for pattern parsing and automaton construction

use azalea::automaton::{subset_construction, Automaton, Nfa, StateId, Symbol};
use azalea::error::PatternErrorKind;
use azalea::lexer::LexerConfig;
use azalea::regex::{self, ClassUniverse, REPEAT_LIMIT};

fn check(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let nfa = regex::compile(pattern).unwrap_or_else(|e| panic!("{pattern:?}: {e}"));
    let dfa = subset_construction(&nfa);
    for input in accepted {
        assert!(nfa.matches(input), "{pattern:?} should accept {input:?}");
        assert!(dfa.accepts(input), "DFA of {pattern:?} should accept {input:?}");
    }
    for input in rejected {
        assert!(!nfa.matches(input), "{pattern:?} should reject {input:?}");
        assert!(!dfa.accepts(input), "DFA of {pattern:?} should reject {input:?}");
    }
}

#[test]
fn test_literals_and_operators() {
    check("abc", &["abc"], &["", "ab", "abcd"]);
    check("a|b|c", &["a", "b", "c"], &["", "ab"]);
    check("ab*c", &["ac", "abc", "abbbc"], &["a", "abb"]);
    check("(ab)+", &["ab", "abab"], &["", "aba"]);
    check("colou?r", &["color", "colour"], &["colouur"]);
}

#[test]
fn test_character_classes() {
    check(r"\d\d", &["42", "00"], &["4", "4a"]);
    check(r"\w+", &["snake_case9"], &["kebab-case"]);
    check(r"a\sb", &["a b", "a\tb", "a\nb"], &["ab", "a_b"]);
    check("[^0-9]", &["a", "\n", "~"], &["5", "é"]);
    check(r"[\d.]+", &["3.14"], &["3,14"]);
}

#[test]
fn test_escapes() {
    check(r"\(\)\*\+\?\|\[\]\.\\", &["()*+?|[].\\"], &[]);
    check(r"\t\n", &["\t\n"], &["tn"]);
}

#[test]
fn test_bounded_repetition() {
    check("a{2,3}", &["aa", "aaa"], &["a", "aaaa"]);
    check("(ab){2}", &["abab"], &["ab", "ababab"]);
    check("x{0}y", &["y"], &["xy"]);
    check("[0-9]{2,}", &["12", "12345"], &["1"]);
}

#[test]
fn test_literal_braces() {
    check("{}", &["{}"], &[]);
    check("a{b}", &["a{b}"], &["ab"]);
}

#[test]
fn test_empty_language_members() {
    check("a*", &["", "aaa"], &["b"]);
    check("(a|b?)", &["", "a", "b"], &["ab"]);
}

#[test]
fn test_error_offsets() {
    let cases: [(&str, usize, PatternErrorKind); 8] = [
        ("", 0, PatternErrorKind::EmptyPattern),
        ("ab(c", 2, PatternErrorKind::UnclosedGroup),
        ("abc)", 3, PatternErrorKind::UnmatchedParen),
        ("x()", 1, PatternErrorKind::EmptyGroup),
        ("[a-z", 0, PatternErrorKind::UnterminatedClass),
        ("a[]", 1, PatternErrorKind::EmptyClass),
        ("[9-0]", 1, PatternErrorKind::InvalidRange { lo: '9', hi: '0' }),
        (r"ab\k", 2, PatternErrorKind::InvalidEscape { escape: 'k' }),
    ];
    for (pattern, offset, kind) in cases {
        let err = regex::compile(pattern).unwrap_err();
        assert_eq!((err.offset, err.kind), (offset, kind), "pattern {pattern:?}");
    }
}

#[test]
fn test_trailing_operator_is_rejected() {
    let err = regex::compile("ab|").unwrap_err();
    assert_eq!(err.kind, PatternErrorKind::MissingOperand { operator: "|".into() });
    assert_eq!(err.offset, 2);
}

#[test]
fn test_repeat_limit() {
    assert!(regex::compile(&format!("a{{{REPEAT_LIMIT}}}")).is_ok());
    let err = regex::compile(&format!("a{{{}}}", REPEAT_LIMIT + 1)).unwrap_err();
    assert!(matches!(err.kind, PatternErrorKind::InvalidRepetition { .. }));
}

#[test]
fn test_thompson_shapes() {
    let literal = Nfa::symbol('c');
    assert_eq!(literal.len(), 2);

    let union = Nfa::symbol('a').union(&Nfa::symbol('b'));
    assert_eq!(union.len(), 6);
    assert_eq!(union.accepting(), &[StateId(5)]);

    let star = Nfa::symbol('a').star();
    assert_eq!(star.len(), 4);
    let start_edges = star.state(star.start()).transitions();
    assert_eq!(start_edges, &[(Symbol::Epsilon, StateId(1)), (Symbol::Epsilon, StateId(3))]);

    let plus = Nfa::symbol('a').plus();
    assert_eq!(plus.len(), 6);
    assert_eq!(plus.accepting(), &[StateId(5)]);
}

#[test]
fn test_compiled_ids_are_reproducible() {
    let first = regex::compile(r"(global|local)\s+[a-z]+").unwrap();
    let second = regex::compile(r"(global|local)\s+[a-z]+").unwrap();
    assert_eq!(first, second);
    assert_eq!(subset_construction(&first), subset_construction(&second));
}

#[test]
fn test_wider_universe() {
    let config = LexerConfig {
        universe: ClassUniverse::LATIN1,
        ..LexerConfig::default()
    };
    let nfa = regex::compile_with("[^a]", &config).unwrap();
    assert!(nfa.accepts("é"));
    assert!(!nfa.accepts("a"));
    assert!(!nfa.accepts("ā"));
}

#[test]
fn test_longest_match_is_anchored() {
    let nfa = regex::compile("[a-z]+").unwrap();
    assert_eq!(Automaton::longest_match(&nfa, "abc def"), Some(3));
    assert_eq!(Automaton::longest_match(&nfa, " abc"), None);
}
