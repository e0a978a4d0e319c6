//! Automaton visualization utilities
//!
//! Renders NFAs and DFAs as Graphviz DOT graphs or JSON documents. Accepting
//! states are drawn as double circles and the start state gets an
//! incoming arrow from an invisible node.

use azalea::automaton::{Dfa, Nfa, StateId};
use serde_json::{Value, json};
use std::fmt::Write;

/// Generate a DOT/Graphviz representation of an NFA
///
/// Parallel edges with the same symbol are drawn separately.
///
/// # Example
///
/// ```rust
/// use azalea_tools::visualize::nfa_dot;
///
/// let nfa = azalea::regex::compile("a|b").unwrap();
/// let dot = nfa_dot(&nfa, Some("a|b"));
/// assert!(dot.starts_with("digraph NFA {"));
/// ```
#[must_use]
pub fn nfa_dot(nfa: &Nfa, title: Option<&str>) -> String {
    let mut output = String::new();
    graph_header(&mut output, "NFA", title);

    for (index, state) in nfa.states().iter().enumerate() {
        state_node(&mut output, index, state.is_accepting());
    }
    start_edge(&mut output, nfa.start());

    for (index, state) in nfa.states().iter().enumerate() {
        for (symbol, target) in state.transitions() {
            edge(&mut output, index, *target, &symbol.to_string());
        }
    }

    let _ = writeln!(output, "}}");
    output
}

/// Generate a DOT/Graphviz representation of a DFA
///
/// All characters leading from one state to the same target share one edge,
/// labelled with their merged ranges.
#[must_use]
pub fn dfa_dot(dfa: &Dfa, title: Option<&str>) -> String {
    let mut output = String::new();
    graph_header(&mut output, "DFA", title);

    for (index, state) in dfa.states().iter().enumerate() {
        state_node(&mut output, index, state.is_accepting());
    }
    start_edge(&mut output, dfa.start());

    for (index, state) in dfa.states().iter().enumerate() {
        for (target, ranges) in grouped_edges(state.transitions()) {
            edge(&mut output, index, target, &ranges_label(&ranges));
        }
    }

    let _ = writeln!(output, "}}");
    output
}

/// JSON document describing an NFA.
#[must_use]
pub fn nfa_json(nfa: &Nfa) -> Value {
    let states: Vec<Value> = nfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| {
            let transitions: Vec<Value> = state
                .transitions()
                .iter()
                .map(|(symbol, target)| json!({ "symbol": symbol.to_string(), "target": target.0 }))
                .collect();
            json!({ "id": index, "accepting": state.is_accepting(), "transitions": transitions })
        })
        .collect();

    json!({
        "kind": "nfa",
        "start": nfa.start().0,
        "accepting": nfa.accepting().iter().map(|id| id.0).collect::<Vec<_>>(),
        "states": states,
    })
}

/// JSON document describing a DFA, NFA subsets included.
#[must_use]
pub fn dfa_json(dfa: &Dfa) -> Value {
    let states: Vec<Value> = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| {
            let transitions: Vec<Value> = grouped_edges(state.transitions())
                .into_iter()
                .map(|(target, ranges)| json!({ "symbol": ranges_label(&ranges), "target": target.0 }))
                .collect();
            json!({
                "id": index,
                "accepting": state.is_accepting(),
                "subset": state.subset().iter().map(|id| id.0).collect::<Vec<_>>(),
                "transitions": transitions,
            })
        })
        .collect();

    json!({
        "kind": "dfa",
        "start": dfa.start().0,
        "states": states,
    })
}

fn graph_header(output: &mut String, name: &str, title: Option<&str>) {
    let _ = writeln!(output, "digraph {name} {{");
    let _ = writeln!(output, "  rankdir=LR;");
    if let Some(title) = title {
        let _ = writeln!(output, "  label=\"{}\";", escape(title));
        let _ = writeln!(output, "  labelloc=t;");
    }
    let _ = writeln!(output, "  node [shape=circle];");
    let _ = writeln!(output);
}

fn state_node(output: &mut String, index: usize, accepting: bool) {
    let shape = if accepting { "doublecircle" } else { "circle" };
    let _ = writeln!(output, "  s{index} [label=\"{index}\", shape={shape}];");
}

fn start_edge(output: &mut String, start: StateId) {
    let _ = writeln!(output, "  start [shape=point, style=invis];");
    let _ = writeln!(output, "  start -> s{};", start.0);
}

fn edge(output: &mut String, from: usize, to: StateId, label: &str) {
    let _ = writeln!(output, "  s{from} -> s{} [label=\"{}\"];", to.0, escape(label));
}

/// Characters per target, in order of first appearance, merged into runs.
fn grouped_edges(transitions: &[(char, StateId)]) -> Vec<(StateId, Vec<(char, char)>)> {
    let mut groups: Vec<(StateId, Vec<(char, char)>)> = Vec::new();
    for &(c, target) in transitions {
        let slot = if let Some(slot) = groups.iter().position(|(t, _)| *t == target) {
            slot
        } else {
            groups.push((target, Vec::new()));
            groups.len() - 1
        };
        let ranges = &mut groups[slot].1;
        match ranges.last_mut() {
            Some(last) if u32::from(last.1) + 1 == u32::from(c) => last.1 = c,
            _ => ranges.push((c, c)),
        }
    }
    groups
}

fn ranges_label(ranges: &[(char, char)]) -> String {
    ranges
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                lo.escape_debug().to_string()
            } else {
                format!("{}-{}", lo.escape_debug(), hi.escape_debug())
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use azalea::automaton::subset_construction;

    #[test]
    fn test_nfa_dot_lists_every_state() {
        let nfa = azalea::regex::compile("ab").unwrap();
        let dot = nfa_dot(&nfa, None);
        for index in 0..nfa.len() {
            assert!(dot.contains(&format!("  s{index} [")));
        }
        assert!(dot.contains("start -> s0;"));
        assert!(dot.contains("label=\"ε\""));
        assert!(dot.contains("doublecircle"));
    }

    #[test]
    fn test_dfa_dot_merges_character_runs() {
        let dfa = subset_construction(&azalea::regex::compile("[a-c]").unwrap());
        let dot = dfa_dot(&dfa, Some("class"));
        assert!(dot.contains("s0 -> s1 [label=\"a-c\"];"));
        assert!(dot.contains("label=\"class\";"));
    }

    #[test]
    fn test_grouped_edges_keeps_gaps() {
        let groups = grouped_edges(&[('a', StateId(1)), ('b', StateId(1)), ('d', StateId(1)), ('x', StateId(2))]);
        assert_eq!(groups, vec![(StateId(1), vec![('a', 'b'), ('d', 'd')]), (StateId(2), vec![('x', 'x')])]);
    }

    #[test]
    fn test_json_shapes() {
        let nfa = azalea::regex::compile("a*").unwrap();
        let value = nfa_json(&nfa);
        assert_eq!(value["kind"], "nfa");
        assert_eq!(value["states"].as_array().map(Vec::len), Some(nfa.len()));

        let dfa = subset_construction(&nfa);
        let value = dfa_json(&dfa);
        assert_eq!(value["start"], 0);
        assert_eq!(value["states"][0]["accepting"], true);
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape(r#"a"b\"#), r#"a\"b\\"#);
    }
}
