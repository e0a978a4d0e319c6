//! Character classes and the universe negation is taken against.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Character interval over which `.` and negated classes are defined.
///
/// The default is ASCII, `'\0'..='\x7f'`. Widening it grows the alphabet of
/// every automaton that uses `.` or `[^...]`, and with it the DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ClassUniverse {
    pub lo: char,
    pub hi: char,
}

impl Default for ClassUniverse {
    fn default() -> Self {
        Self::ASCII
    }
}

impl ClassUniverse {
    pub const ASCII: Self = Self { lo: '\0', hi: '\x7f' };
    pub const LATIN1: Self = Self { lo: '\0', hi: '\u{ff}' };
    pub const UNICODE: Self = Self {
        lo: '\0',
        hi: char::MAX,
    };

    #[must_use]
    pub const fn contains(self, c: char) -> bool {
        self.lo <= c && c <= self.hi
    }
}

/// Normalized set of inclusive character ranges.
///
/// Ranges are sorted, disjoint and never adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
}

impl CharClass {
    #[must_use]
    pub fn from_ranges(ranges: Vec<(char, char)>) -> Self {
        Self {
            ranges: normalize(ranges),
        }
    }

    #[must_use]
    pub fn single(c: char) -> Self {
        Self { ranges: vec![(c, c)] }
    }

    /// `\d`
    #[must_use]
    pub fn digit() -> Self {
        Self::from_ranges(vec![('0', '9')])
    }

    /// `\w`
    #[must_use]
    pub fn word() -> Self {
        Self::from_ranges(vec![('a', 'z'), ('A', 'Z'), ('0', '9'), ('_', '_')])
    }

    /// `\s`
    #[must_use]
    pub fn space() -> Self {
        Self::from_ranges(vec![(' ', ' '), ('\t', '\r')])
    }

    /// `.`
    #[must_use]
    pub fn any(universe: ClassUniverse) -> Self {
        Self {
            ranges: vec![(universe.lo, universe.hi)],
        }
    }

    #[must_use]
    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if c < lo {
                    std::cmp::Ordering::Greater
                } else if c > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Number of characters in the class.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|&(lo, hi)| range_len(lo, hi)).sum()
    }

    /// Complement within `universe`.
    #[must_use]
    pub fn negate(&self, universe: ClassUniverse) -> Self {
        let mut ranges = Vec::new();
        let mut next = Some(universe.lo);

        for &(lo, hi) in &self.ranges {
            let Some(from) = next else { break };
            if hi < from {
                continue;
            }
            if lo > universe.hi {
                break;
            }
            if lo > from
                && let Some(before) = prev_char(lo)
            {
                ranges.push((from, before));
            }
            next = next_char(hi);
        }

        if let Some(from) = next
            && from <= universe.hi
        {
            ranges.push((from, universe.hi));
        }

        Self { ranges }
    }
}

/// Sort, then merge overlapping and adjacent ranges.
#[must_use]
pub fn normalize(mut ranges: Vec<(char, char)>) -> Vec<(char, char)> {
    ranges.sort_unstable();
    let mut merged: Vec<(char, char)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        if let Some(last) = merged.last_mut()
            && next_char(last.1).is_none_or(|after| lo <= after)
        {
            last.1 = last.1.max(hi);
            continue;
        }
        merged.push((lo, hi));
    }
    merged
}

/// Characters in `lo..=hi`, surrogates excluded.
#[must_use]
pub fn range_len(lo: char, hi: char) -> usize {
    if hi < lo {
        return 0;
    }
    let span = hi as usize - lo as usize + 1;
    let surrogates = if lo <= '\u{d7ff}' && hi >= '\u{e000}' { 0x800 } else { 0 };
    span - surrogates
}

fn next_char(c: char) -> Option<char> {
    match c {
        '\u{d7ff}' => Some('\u{e000}'),
        char::MAX => None,
        _ => char::from_u32(c as u32 + 1),
    }
}

fn prev_char(c: char) -> Option<char> {
    match c {
        '\0' => None,
        '\u{e000}' => Some('\u{d7ff}'),
        _ => char::from_u32(c as u32 - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_merges_overlap_and_adjacency() {
        assert_eq!(
            normalize(vec![('x', 'z'), ('a', 'c'), ('b', 'f'), ('g', 'h')]),
            vec![('a', 'h'), ('x', 'z')]
        );
    }

    #[test]
    fn test_word_class() {
        let word = CharClass::word();
        assert_eq!(word.ranges(), &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')]);
        assert!(word.contains('_'));
        assert!(!word.contains('-'));
        assert_eq!(word.len(), 63);
    }

    #[test]
    fn test_negate_within_ascii() {
        let class = CharClass::from_ranges(vec![('>', '>')]);
        let negated = class.negate(ClassUniverse::ASCII);
        assert_eq!(negated.ranges(), &[('\0', '='), ('?', '\x7f')]);
        assert!(!negated.contains('>'));
        assert!(negated.contains('\n'));
        assert!(!negated.contains('é'));
    }

    #[test]
    fn test_negate_everything_is_empty() {
        let all = CharClass::any(ClassUniverse::ASCII);
        assert!(all.negate(ClassUniverse::ASCII).is_empty());
    }

    #[test]
    fn test_negate_ignores_chars_outside_universe() {
        let class = CharClass::from_ranges(vec![('a', 'a'), ('é', 'é')]);
        let negated = class.negate(ClassUniverse::ASCII);
        assert_eq!(negated.len(), 127);
    }

    #[test]
    fn test_range_len_skips_surrogates() {
        assert_eq!(range_len('a', 'z'), 26);
        assert_eq!(range_len('\u{d7ff}', '\u{e000}'), 2);
    }

    #[test]
    fn test_negate_across_surrogate_gap() {
        let class = CharClass::from_ranges(vec![('\u{d7ff}', '\u{d7ff}')]);
        let negated = class.negate(ClassUniverse::UNICODE);
        assert!(negated.contains('\u{e000}'));
        assert!(!negated.contains('\u{d7ff}'));
    }
}
