//!
//! A crate containing finite automata and the subset construction that
//! converts a nondeterministic automaton into a deterministic one.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod dfa;
mod nfa;
mod random_nfa;
mod state_set;
mod subset_construction;

pub use dfa::*;
pub use nfa::*;
pub use random_nfa::*;
pub use state_set::*;
pub use subset_construction::*;
