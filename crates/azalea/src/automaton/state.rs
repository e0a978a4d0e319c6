use smallvec::SmallVec;
use std::fmt;

/// Index of a state inside the arena of the automaton that owns it.
///
/// Ids are only meaningful for their own automaton. Conversions to usize
/// for indexing are lossless on all supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

impl StateId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    // Arenas are bounded by `CompileLimits` far below u32::MAX
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sorted, deduplicated set of NFA states.
///
/// Two sets built from the same states in any order compare and hash equal,
/// which makes a `StateSet` usable as the identity of a DFA state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet(SmallVec<[StateId; 8]>);

impl StateSet {
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[StateId] {
        &self.0
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut ids: SmallVec<[StateId; 8]> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_is_order_independent() {
        let a: StateSet = [StateId(3), StateId(1), StateId(2)].into_iter().collect();
        let b: StateSet = [StateId(2), StateId(3), StateId(1), StateId(1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_string(), "{1, 2, 3}");
    }

    #[test]
    fn test_state_set_contains() {
        let set: StateSet = [StateId(0), StateId(4)].into_iter().collect();
        assert!(set.contains(StateId(4)));
        assert!(!set.contains(StateId(2)));
        assert!(StateSet::new().is_empty());
    }
}
