use std::fmt;

/// Edge label of an NFA transition.
///
/// A `Range` edge accepts every character in `lo..=hi`; testing a character
/// against it is containment, not key equality. `Epsilon` never consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    Range { lo: char, hi: char },
    Epsilon,
}

impl Symbol {
    /// Single-character range collapses to [`Symbol::Char`].
    #[must_use]
    pub const fn range(lo: char, hi: char) -> Self {
        if lo == hi {
            Self::Char(lo)
        } else {
            Self::Range { lo, hi }
        }
    }

    #[must_use]
    pub const fn matches(self, c: char) -> bool {
        match self {
            Self::Char(expected) => expected == c,
            Self::Range { lo, hi } => lo <= c && c <= hi,
            Self::Epsilon => false,
        }
    }

    #[must_use]
    pub const fn is_epsilon(self) -> bool {
        matches!(self, Self::Epsilon)
    }

    /// Inclusive character bounds of a consuming symbol.
    #[must_use]
    pub const fn bounds(self) -> Option<(char, char)> {
        match self {
            Self::Char(c) => Some((c, c)),
            Self::Range { lo, hi } => Some((lo, hi)),
            Self::Epsilon => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c.escape_debug()),
            Self::Range { lo, hi } => write!(f, "{}-{}", lo.escape_debug(), hi.escape_debug()),
            Self::Epsilon => f.write_str("ε"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_matches() {
        assert!(Symbol::Char('a').matches('a'));
        assert!(!Symbol::Char('a').matches('b'));
        assert!(Symbol::range('0', '9').matches('5'));
        assert!(!Symbol::range('0', '9').matches('a'));
        assert!(!Symbol::Epsilon.matches('a'));
    }

    #[test]
    fn test_single_char_range_is_char() {
        assert_eq!(Symbol::range('x', 'x'), Symbol::Char('x'));
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::range('a', 'z').to_string(), "a-z");
        assert_eq!(Symbol::Char('\n').to_string(), "\\n");
        assert_eq!(Symbol::Epsilon.to_string(), "ε");
    }
}
