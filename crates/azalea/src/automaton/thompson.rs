//! Thompson construction.
//!
//! Every operator takes its operands by reference and copies them into a
//! fresh arena, so one fragment can serve as a template for any number of
//! larger expressions. Within a result, new entry states get the lowest ids,
//! copied operands follow in operand order, and new exit states come last.

use super::{Nfa, Symbol};
use crate::error::{PatternError, PatternErrorKind, PatternResult};
use crate::regex::class::CharClass;
use crate::regex::parser::{RegexToken, RegexTokenKind};

impl Nfa {
    /// `start --c--> accept`
    #[must_use]
    pub fn symbol(c: char) -> Self {
        Self::edge(Symbol::Char(c))
    }

    /// `start --[lo-hi]--> accept`
    #[must_use]
    pub fn range(lo: char, hi: char) -> Self {
        Self::edge(Symbol::range(lo, hi))
    }

    fn edge(symbol: Symbol) -> Self {
        let mut nfa = Self::blank();
        let start = nfa.add_state();
        let accept = nfa.add_state();
        nfa.add_transition(start, symbol, accept);
        nfa.set_accepting(accept, true);
        nfa.start = start;
        nfa
    }

    /// Accepts only the empty string: one state that starts and accepts.
    #[must_use]
    pub fn empty() -> Self {
        let mut nfa = Self::blank();
        let start = nfa.add_state();
        nfa.set_accepting(start, true);
        nfa.start = start;
        nfa
    }

    /// Union of the ranges of a character class.
    ///
    /// An empty class yields a lone start state that accepts nothing.
    #[must_use]
    pub fn class(class: &CharClass) -> Self {
        let mut ranges = class.ranges().iter().map(|&(lo, hi)| Self::range(lo, hi));
        let Some(first) = ranges.next() else {
            let mut nfa = Self::blank();
            nfa.start = nfa.add_state();
            return nfa;
        };
        ranges.fold(first, |acc, next| acc.union(&next))
    }

    /// Deep copy under fresh ids.
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut nfa = Self::blank();
        nfa.start = nfa.absorb(self).start;
        nfa
    }

    /// `self · other`
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut nfa = self.copy();
        nfa.append(other);
        nfa
    }

    /// Extend `self` in place with a copy of `other`.
    fn append(&mut self, other: &Self) {
        let left_accepts = self.accepting.clone();
        let right = self.absorb(other);
        for id in left_accepts {
            self.add_transition(id, Symbol::Epsilon, right.start);
            self.set_accepting(id, false);
        }
    }

    /// `self | other`
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut nfa = Self::blank();
        let start = nfa.add_state();
        let left = nfa.absorb(self);
        let right = nfa.absorb(other);
        let accept = nfa.add_state();

        nfa.add_transition(start, Symbol::Epsilon, left.start);
        nfa.add_transition(start, Symbol::Epsilon, right.start);
        for &id in left.accepting.iter().chain(&right.accepting) {
            nfa.add_transition(id, Symbol::Epsilon, accept);
            nfa.set_accepting(id, false);
        }

        nfa.set_accepting(accept, true);
        nfa.start = start;
        nfa
    }

    /// `self*`
    #[must_use]
    pub fn star(&self) -> Self {
        self.wrap(true)
    }

    /// `self?`
    #[must_use]
    pub fn optional(&self) -> Self {
        self.wrap(false)
    }

    /// New start and accept around a copy, with a bypass edge; `repeat`
    /// adds the loop back to the inner start.
    fn wrap(&self, repeat: bool) -> Self {
        let mut nfa = Self::blank();
        let start = nfa.add_state();
        let inner = nfa.absorb(self);
        let accept = nfa.add_state();

        nfa.add_transition(start, Symbol::Epsilon, inner.start);
        nfa.add_transition(start, Symbol::Epsilon, accept);
        for &id in &inner.accepting {
            if repeat {
                nfa.add_transition(id, Symbol::Epsilon, inner.start);
            }
            nfa.add_transition(id, Symbol::Epsilon, accept);
            nfa.set_accepting(id, false);
        }

        nfa.set_accepting(accept, true);
        nfa.start = start;
        nfa
    }

    /// `self+`, built as `self · self*`.
    #[must_use]
    pub fn plus(&self) -> Self {
        self.concat(&self.star())
    }

    /// `self{min,max}`; `max = None` leaves the upper bound open.
    ///
    /// Expands to `min` copies followed by either a star or `max - min`
    /// optional copies. `{0}` and `{0,0}` accept only the empty string.
    #[must_use]
    pub fn repeat(&self, min: u32, max: Option<u32>) -> Self {
        let optional;
        let star;
        let (tail, tail_count): (&Self, u32) = match max {
            None => {
                star = self.star();
                (&star, 1)
            }
            Some(max) => {
                optional = self.optional();
                (&optional, max.saturating_sub(min))
            }
        };

        let mut pieces =
            std::iter::repeat_n(self, min as usize).chain(std::iter::repeat_n(tail, tail_count as usize));
        let Some(first) = pieces.next() else {
            return Self::empty();
        };
        let mut result = first.copy();
        for piece in pieces {
            result.append(piece);
        }
        result
    }

    /// States `self{min,max}` will allocate, without building it.
    #[must_use]
    pub fn repeat_size(&self, min: u32, max: Option<u32>) -> usize {
        let len = self.len();
        match max {
            None => len * min as usize + len + 2,
            Some(max) => len * min as usize + (len + 2) * max.saturating_sub(min) as usize,
        }
    }
}

/// Build the automaton for a postfix token stream.
///
/// Fails with `MissingOperand` when an operator finds too few fragments on
/// the stack, and with `TooComplex` once the arena would grow past
/// `max_states`.
///
/// # Errors
///
/// Returns a [`PatternError`] naming the offending token.
pub fn build(postfix: &[RegexToken], max_states: usize) -> PatternResult<Nfa> {
    let mut stack: Vec<Nfa> = Vec::new();

    for token in postfix {
        let missing = || PatternError::new(token.offset, PatternErrorKind::MissingOperand {
            operator: token.kind.operator_label(),
        });

        let fragment = match &token.kind {
            RegexTokenKind::Literal(c) => Nfa::symbol(*c),
            RegexTokenKind::Class(class) => Nfa::class(class),
            RegexTokenKind::Union | RegexTokenKind::Concat => {
                let right = stack.pop().ok_or_else(missing)?;
                let left = stack.pop().ok_or_else(missing)?;
                if matches!(token.kind, RegexTokenKind::Union) {
                    left.union(&right)
                } else {
                    left.concat(&right)
                }
            }
            RegexTokenKind::Star => stack.pop().ok_or_else(missing)?.star(),
            RegexTokenKind::Plus => stack.pop().ok_or_else(missing)?.plus(),
            RegexTokenKind::Question => stack.pop().ok_or_else(missing)?.optional(),
            RegexTokenKind::Repeat { min, max } => {
                let operand = stack.pop().ok_or_else(missing)?;
                if operand.repeat_size(*min, *max) > max_states {
                    return Err(too_large(token.offset, max_states));
                }
                operand.repeat(*min, *max)
            }
            RegexTokenKind::LParen | RegexTokenKind::RParen => {
                // Shunting-yard consumes every parenthesis
                return Err(PatternError::new(token.offset, PatternErrorKind::UnmatchedParen));
            }
        };

        if fragment.len() > max_states {
            return Err(too_large(token.offset, max_states));
        }
        stack.push(fragment);
    }

    let nfa = stack.pop().ok_or(PatternError::new(0, PatternErrorKind::EmptyPattern))?;
    // Implicit concatenation leaves exactly one fragment for valid input
    if !stack.is_empty() {
        return Err(PatternError::new(0, PatternErrorKind::MissingOperand {
            operator: RegexTokenKind::Concat.operator_label(),
        }));
    }

    debug_assert!(nfa.is_well_formed());
    Ok(nfa)
}

fn too_large(offset: usize, max_states: usize) -> PatternError {
    PatternError::new(offset, PatternErrorKind::TooComplex {
        reason: format!("NFA exceeds {max_states} states"),
    })
}
