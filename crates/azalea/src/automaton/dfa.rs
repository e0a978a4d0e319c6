use super::{Automaton, Nfa, StateId, StateSet};
use crate::error::StateLimitExceeded;
use hashbrown::HashMap;
use std::collections::VecDeque;

/// DFA state with the NFA subset it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    subset: StateSet,
    accepting: bool,
    /// Sorted by character for binary search lookup
    transitions: Vec<(char, StateId)>,
}

impl DfaState {
    #[must_use]
    pub const fn subset(&self) -> &StateSet {
        &self.subset
    }

    #[must_use]
    pub const fn is_accepting(&self) -> bool {
        self.accepting
    }

    #[must_use]
    pub fn transitions(&self) -> &[(char, StateId)] {
        &self.transitions
    }

    fn find_transition(&self, c: char) -> Option<StateId> {
        self.transitions
            .binary_search_by_key(&c, |&(symbol, _)| symbol)
            .ok()
            .map(|idx| self.transitions[idx].1)
    }
}

/// Deterministic automaton produced by subset construction.
///
/// A missing transition is the dead state. State 0 is always the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: StateId,
}

/// Determinize `nfa`.
///
/// Subsets are deduplicated by set equality, so every reachable subset
/// becomes exactly one DFA state and the construction terminates.
#[must_use]
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    let Ok(dfa) = subset_construction_with_limit(nfa, usize::MAX) else {
        unreachable!("an unbounded construction has no state limit to exceed");
    };
    dfa
}

/// Determinize `nfa`, giving up once more than `max_states` states exist.
///
/// # Errors
///
/// Returns [`StateLimitExceeded`] when the DFA would exceed `max_states`.
pub fn subset_construction_with_limit(nfa: &Nfa, max_states: usize) -> Result<Dfa, StateLimitExceeded> {
    let alphabet = nfa.alphabet();
    let start_set = nfa.start_set();

    let mut dfa = Dfa {
        states: Vec::new(),
        start: StateId(0),
    };
    let mut index: HashMap<StateSet, StateId, ahash::RandomState> = HashMap::with_hasher(ahash::RandomState::new());
    let mut queue: VecDeque<StateId> = VecDeque::new();

    let start = dfa.add_state(start_set.clone(), nfa.accepts_any(&start_set));
    index.insert(start_set, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let subset = dfa.states[current.index()].subset.clone();
        let mut transitions = Vec::new();

        for &c in &alphabet {
            let next = nfa.step(&subset, c);
            if next.is_empty() {
                continue;
            }

            let target = if let Some(&existing) = index.get(&next) {
                existing
            } else {
                if dfa.states.len() >= max_states {
                    return Err(StateLimitExceeded { limit: max_states });
                }
                let accepting = nfa.accepts_any(&next);
                let id = dfa.add_state(next.clone(), accepting);
                index.insert(next, id);
                queue.push_back(id);
                id
            };
            transitions.push((c, target));
        }

        // Alphabet iteration is ascending, so transitions are already sorted
        dfa.states[current.index()].transitions = transitions;
    }

    log::trace!(
        "subset construction: {} NFA states -> {} DFA states over {} symbols",
        nfa.len(),
        dfa.len(),
        alphabet.len()
    );
    Ok(dfa)
}

impl Dfa {
    fn add_state(&mut self, subset: StateSet, accepting: bool) -> StateId {
        let id = StateId::from_index(self.states.len());
        self.states.push(DfaState {
            subset,
            accepting,
            transitions: Vec::new(),
        });
        id
    }

    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &DfaState {
        &self.states[id.index()]
    }

    #[must_use]
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// NFA subset a DFA state represents.
    #[must_use]
    pub fn subset(&self, id: StateId) -> &StateSet {
        &self.states[id.index()].subset
    }

    #[must_use]
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.states[id.index()].accepting
    }

    /// Target of `state` on `c`, or `None` for the dead state.
    #[must_use]
    pub fn next_state(&self, state: StateId, c: char) -> Option<StateId> {
        self.states[state.index()].find_transition(c)
    }

    /// Every edge as `(from, char, to)`, ordered by source then character.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.states.iter().enumerate().flat_map(|(i, state)| {
            let from = StateId::from_index(i);
            state.transitions.iter().map(move |&(c, to)| (from, c, to))
        })
    }

    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Whether the whole of `input` is in the language.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start;
        for c in input.chars() {
            match self.next_state(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Byte length of the longest accepted prefix of `input`.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<usize> {
        let mut state = self.start;
        let mut last = self.is_accepting(state).then_some(0);

        for (offset, c) in input.char_indices() {
            let Some(next) = self.next_state(state, c) else {
                break;
            };
            state = next;
            if self.is_accepting(state) {
                last = Some(offset + c.len_utf8());
            }
        }

        last
    }
}

impl Automaton for Dfa {
    fn accepts(&self, input: &str) -> bool {
        Self::accepts(self, input)
    }

    fn longest_match(&self, input: &str) -> Option<usize> {
        Self::longest_match(self, input)
    }

    fn state_count(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_or_b_star_c() -> Nfa {
        Nfa::symbol('a').union(&Nfa::symbol('b')).star().concat(&Nfa::symbol('c'))
    }

    #[test]
    fn test_start_is_closure_of_nfa_start() {
        let nfa = a_or_b_star_c();
        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.start(), StateId(0));
        assert_eq!(dfa.subset(dfa.start()), &nfa.start_set());
    }

    #[test]
    fn test_accepts_matches_nfa() {
        let nfa = a_or_b_star_c();
        let dfa = subset_construction(&nfa);
        for input in ["c", "ac", "abbac", "", "a", "ca", "abd"] {
            assert_eq!(dfa.accepts(input), nfa.matches(input), "input {input:?}");
        }
    }

    #[test]
    fn test_subsets_are_deduplicated() {
        let nfa = a_or_b_star_c();
        let dfa = subset_construction(&nfa);
        let mut subsets: Vec<_> = dfa.states().iter().map(DfaState::subset).collect();
        let total = subsets.len();
        subsets.sort_by_key(|s| s.as_slice().to_vec());
        subsets.dedup();
        assert_eq!(subsets.len(), total);
        // start, after a, after b, after c
        assert_eq!(dfa.len(), 4);
    }

    #[test]
    fn test_accepting_iff_subset_has_nfa_accept() {
        let nfa = a_or_b_star_c();
        let dfa = subset_construction(&nfa);
        for state in dfa.states() {
            assert_eq!(state.is_accepting(), nfa.accepts_any(state.subset()));
        }
    }

    #[test]
    fn test_ranges_expand_to_characters() {
        let dfa = subset_construction(&Nfa::range('0', '3'));
        let labels: Vec<char> = dfa.transitions().map(|(_, c, _)| c).collect();
        assert_eq!(labels, vec!['0', '1', '2', '3']);
    }

    #[test]
    fn test_longest_match() {
        let dfa = subset_construction(&Nfa::range('a', 'z').plus());
        assert_eq!(dfa.longest_match("isnow is"), Some(5));
        assert_eq!(dfa.longest_match("9"), None);
    }

    #[test]
    fn test_state_limit() {
        let nfa = a_or_b_star_c();
        let err = subset_construction_with_limit(&nfa, 2).unwrap_err();
        assert_eq!(err, StateLimitExceeded { limit: 2 });
        assert!(subset_construction_with_limit(&nfa, 4).is_ok());
    }
}
