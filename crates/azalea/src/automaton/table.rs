//! Plain-text transition tables.
//!
//! Start states are marked `->`, accepting states `*`. DFA rows merge runs of
//! consecutive characters with the same target into one range row.

use super::{Dfa, Nfa, StateId, StateSet, Symbol};
use std::fmt::Write;

const RULE: &str = "------------------------------------------------";

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:<8} | {:<18} | Target", "State", "Symbol");
    let _ = writeln!(out, "{RULE}");
}

fn label(id: StateId, start: bool, accepting: bool) -> String {
    let marker = match (start, accepting) {
        (true, true) => "->*",
        (true, false) => "->",
        (false, true) => "*",
        (false, false) => "",
    };
    format!("{marker}{id}")
}

fn row(out: &mut String, state: &str, symbol: &str, target: &str) {
    let _ = writeln!(out, "{state:<8} | {symbol:<18} | {target}");
}

fn char_label(c: char) -> String {
    format!("'{}'", c.escape_debug())
}

/// Table of an NFA, one row per distinct edge symbol of each state.
#[must_use]
pub fn nfa_table(nfa: &Nfa) -> String {
    let mut out = String::new();
    header(&mut out, "NFA transition table");

    for (index, state) in nfa.states().iter().enumerate() {
        let id = StateId::from_index(index);
        let name = label(id, id == nfa.start(), state.is_accepting());

        // Group targets by symbol, in order of first appearance
        let mut groups: Vec<(Symbol, Vec<StateId>)> = Vec::new();
        for &(symbol, target) in state.transitions() {
            match groups.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, targets)) => targets.push(target),
                None => groups.push((symbol, vec![target])),
            }
        }

        if groups.is_empty() {
            row(&mut out, &name, "∅", "∅");
            continue;
        }
        for (i, (symbol, targets)) in groups.into_iter().enumerate() {
            let symbol = match symbol {
                Symbol::Char(c) => char_label(c),
                Symbol::Range { lo, hi } => format!("{}-{}", char_label(lo), char_label(hi)),
                Symbol::Epsilon => "ε".to_owned(),
            };
            let targets: StateSet = targets.into_iter().collect();
            row(&mut out, if i == 0 { &name } else { "" }, &symbol, &targets.to_string());
        }
    }

    out
}

/// Table of a DFA, with the NFA subset of every state listed below it.
#[must_use]
pub fn dfa_table(dfa: &Dfa) -> String {
    let mut out = String::new();
    header(&mut out, "DFA transition table");

    for (index, state) in dfa.states().iter().enumerate() {
        let id = StateId::from_index(index);
        let name = label(id, id == dfa.start(), state.is_accepting());

        let runs = merge_runs(state.transitions());
        if runs.is_empty() {
            row(&mut out, &name, "∅", "∅");
            continue;
        }
        for (i, (lo, hi, target)) in runs.into_iter().enumerate() {
            let symbol = if lo == hi {
                char_label(lo)
            } else {
                format!("{}-{}", char_label(lo), char_label(hi))
            };
            row(&mut out, if i == 0 { &name } else { "" }, &symbol, &target.to_string());
        }
    }

    let _ = writeln!(out, "{RULE}");
    for (index, state) in dfa.states().iter().enumerate() {
        let _ = writeln!(out, "{index:<8} = {}", state.subset());
    }
    out
}

/// Collapse consecutive characters sharing a target into ranges.
fn merge_runs(transitions: &[(char, StateId)]) -> Vec<(char, char, StateId)> {
    let mut runs: Vec<(char, char, StateId)> = Vec::new();
    for &(c, target) in transitions {
        if let Some(last) = runs.last_mut()
            && last.2 == target
            && char::from_u32(last.1 as u32 + 1) == Some(c)
        {
            last.1 = c;
            continue;
        }
        runs.push((c, c, target));
    }
    runs
}
