use super::{Automaton, StateId, StateSet, Symbol};
use smallvec::SmallVec;

/// A state of an [`Nfa`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) accepting: bool,
    /// Outgoing edges in insertion order. One symbol may fan out to
    /// several targets.
    pub(crate) transitions: SmallVec<[(Symbol, StateId); 2]>,
}

impl NfaState {
    #[must_use]
    pub const fn is_accepting(&self) -> bool {
        self.accepting
    }

    #[must_use]
    pub fn transitions(&self) -> &[(Symbol, StateId)] {
        &self.transitions
    }
}

/// Nondeterministic finite automaton stored as an arena of states.
///
/// Every edge target and every id in the accepting list index into
/// `states`; the accepting list holds exactly the states whose flag is set.
/// Cycles created by `*` and `+` are ordinary edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: StateId,
    pub(crate) accepting: Vec<StateId>,
}

/// Start and accepting states of an automaton copied into another arena.
pub(crate) struct Absorbed {
    pub(crate) start: StateId,
    pub(crate) accepting: SmallVec<[StateId; 4]>,
}

impl Nfa {
    /// An arena with no states. Only valid once a start state is added.
    pub(crate) const fn blank() -> Self {
        Self {
            states: Vec::new(),
            start: StateId(0),
            accepting: Vec::new(),
        }
    }

    pub(crate) fn add_state(&mut self) -> StateId {
        let id = StateId::from_index(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    pub(crate) fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        debug_assert!(to.index() < self.states.len(), "edge target out of arena");
        self.states[from.index()].transitions.push((symbol, to));
    }

    pub(crate) fn set_accepting(&mut self, id: StateId, accepting: bool) {
        let state = &mut self.states[id.index()];
        if state.accepting == accepting {
            return;
        }
        state.accepting = accepting;
        if accepting {
            self.accepting.push(id);
        } else {
            self.accepting.retain(|&a| a != id);
        }
    }

    /// Copy every state of `other` into this arena under fresh ids.
    ///
    /// Accepting flags carry over; edges are shifted by the arena offset.
    pub(crate) fn absorb(&mut self, other: &Self) -> Absorbed {
        let offset = u32::try_from(self.states.len()).unwrap_or(u32::MAX);
        let shift = |id: StateId| StateId(id.0.saturating_add(offset));

        self.states.extend(other.states.iter().map(|state| NfaState {
            accepting: state.accepting,
            transitions: state
                .transitions
                .iter()
                .map(|&(symbol, target)| (symbol, shift(target)))
                .collect(),
        }));

        let accepting: SmallVec<[StateId; 4]> = other.accepting.iter().map(|&a| shift(a)).collect();
        self.accepting.extend(accepting.iter().copied());

        Absorbed {
            start: shift(other.start),
            accepting,
        }
    }

    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id.index()]
    }

    #[must_use]
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Accepting states in the order they were marked.
    #[must_use]
    pub fn accepting(&self) -> &[StateId] {
        &self.accepting
    }

    #[must_use]
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.states[id.index()].accepting
    }

    /// Whether any state of `set` accepts.
    #[must_use]
    pub fn accepts_any(&self, set: &StateSet) -> bool {
        set.iter().any(|id| self.is_accepting(id))
    }

    /// Number of edges, epsilon edges included.
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// States reachable from `seeds` through epsilon edges alone, seeds included.
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = StateId>) -> StateSet {
        let mut visited = vec![false; self.states.len()];
        let mut stack: Vec<StateId> = Vec::new();
        let mut closure: Vec<StateId> = Vec::new();

        for id in seeds {
            if !visited[id.index()] {
                visited[id.index()] = true;
                stack.push(id);
            }
        }

        while let Some(id) = stack.pop() {
            closure.push(id);
            for &(symbol, target) in &self.states[id.index()].transitions {
                if symbol.is_epsilon() && !visited[target.index()] {
                    visited[target.index()] = true;
                    stack.push(target);
                }
            }
        }

        closure.into_iter().collect()
    }

    /// Epsilon closure of the start state.
    #[must_use]
    pub fn start_set(&self) -> StateSet {
        self.epsilon_closure([self.start])
    }

    /// Targets of every non-epsilon edge out of `set` that accepts `c`.
    #[must_use]
    pub fn move_on(&self, set: &StateSet, c: char) -> Vec<StateId> {
        set.iter()
            .flat_map(|id| self.states[id.index()].transitions.iter())
            .filter(|(symbol, _)| symbol.matches(c))
            .map(|&(_, target)| target)
            .collect()
    }

    /// One simulation step: move on `c`, then close over epsilon edges.
    #[must_use]
    pub fn step(&self, set: &StateSet, c: char) -> StateSet {
        let targets = self.move_on(set, c);
        if targets.is_empty() {
            return StateSet::new();
        }
        self.epsilon_closure(targets)
    }

    /// Whether the whole of `input` is in the language.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        let mut active = self.start_set();
        for c in input.chars() {
            active = self.step(&active, c);
            if active.is_empty() {
                return false;
            }
        }
        self.accepts_any(&active)
    }

    /// Byte length of the longest prefix of `input` in the language.
    ///
    /// `Some(0)` means only the empty prefix is accepted.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<usize> {
        let mut active = self.start_set();
        let mut last = self.accepts_any(&active).then_some(0);

        for (offset, c) in input.char_indices() {
            active = self.step(&active, c);
            if active.is_empty() {
                break;
            }
            if self.accepts_any(&active) {
                last = Some(offset + c.len_utf8());
            }
        }

        last
    }

    /// Disjoint sorted ranges covering every character on a consuming edge.
    #[must_use]
    pub fn alphabet_ranges(&self) -> Vec<(char, char)> {
        let bounds = self
            .states
            .iter()
            .flat_map(|s| s.transitions.iter())
            .filter_map(|(symbol, _)| symbol.bounds());
        crate::regex::class::normalize(bounds.collect())
    }

    /// Number of distinct characters on consuming edges.
    #[must_use]
    pub fn alphabet_len(&self) -> usize {
        self.alphabet_ranges()
            .iter()
            .map(|&(lo, hi)| crate::regex::class::range_len(lo, hi))
            .sum()
    }

    /// Every character on a consuming edge, ranges expanded, ascending.
    #[must_use]
    pub fn alphabet(&self) -> Vec<char> {
        self.alphabet_ranges()
            .into_iter()
            .flat_map(|(lo, hi)| lo..=hi)
            .collect()
    }

    /// Structural invariants: edge targets in bounds and the accepting
    /// list mirroring the flags.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let len = self.states.len();
        let edges_ok = self
            .states
            .iter()
            .flat_map(|s| s.transitions.iter())
            .all(|(_, target)| target.index() < len);

        let mut flagged: Vec<StateId> = (0..len)
            .filter(|&i| self.states[i].accepting)
            .map(StateId::from_index)
            .collect();
        let mut listed = self.accepting.clone();
        flagged.sort_unstable();
        listed.sort_unstable();

        edges_ok && self.start.index() < len && flagged == listed
    }
}

impl Automaton for Nfa {
    fn accepts(&self, input: &str) -> bool {
        self.matches(input)
    }

    fn longest_match(&self, input: &str) -> Option<usize> {
        Self::longest_match(self, input)
    }

    fn state_count(&self) -> usize {
        self.len()
    }
}
