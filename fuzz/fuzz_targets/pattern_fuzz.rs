#![no_main]
use azalea::automaton::{Automaton, subset_construction_with_limit};
use azalea::regex;
use libfuzzer_sys::fuzz_target;

// First line is the pattern, the rest is matched against it.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (pattern, input) = text.split_once('\n').unwrap_or((text, ""));

    let Ok(nfa) = regex::compile(pattern) else {
        return;
    };
    assert!(nfa.is_well_formed());

    let Ok(dfa) = subset_construction_with_limit(&nfa, 2048) else {
        return;
    };
    assert_eq!(nfa.accepts(input), dfa.accepts(input));
    assert_eq!(Automaton::longest_match(&nfa, input), Automaton::longest_match(&dfa, input));
});
