//! # Automaton Module
//!
//! Finite automata for token patterns.
//!
//! ## Overview
//!
//! - [`Nfa`]: arena of states built by Thompson construction, simulated
//!   directly by tracking the active state set.
//! - [`Dfa`]: produced from an NFA by [`subset_construction`]; each state is
//!   a deduplicated set of NFA states.
//!
//! Both answer the same questions through the [`Automaton`] trait and accept
//! exactly the same strings.
//!
//! ## Usage
//!
//! ```rust
//! use azalea::automaton::{subset_construction, Automaton, Nfa};
//!
//! // [0-9]+(\.[0-9]+)?
//! let digits = Nfa::range('0', '9').plus();
//! let number = digits.concat(&Nfa::symbol('.').concat(&digits).optional());
//! let dfa = subset_construction(&number);
//!
//! assert!(number.accepts("3.14"));
//! assert!(dfa.accepts("3.14"));
//! assert_eq!(dfa.longest_match("42.x"), Some(2));
//! ```

pub mod dfa;
pub mod nfa;
pub mod state;
pub mod symbol;
pub mod table;
pub mod thompson;

pub use dfa::{subset_construction, subset_construction_with_limit, Dfa, DfaState};
pub use nfa::{Nfa, NfaState};
pub use state::{StateId, StateSet};
pub use symbol::Symbol;
pub use table::{dfa_table, nfa_table};

/// Common interface of the NFA and DFA matchers.
///
/// All matching is anchored at the start of `input`.
pub trait Automaton {
    /// Whether the whole of `input` is in the language.
    fn accepts(&self, input: &str) -> bool;

    /// Byte length of the longest accepted prefix, `Some(0)` when only the
    /// empty prefix is accepted.
    fn longest_match(&self, input: &str) -> Option<usize>;

    fn state_count(&self) -> usize;
}
