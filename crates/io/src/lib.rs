//!
//! A crate containing IO related functionality. This includes the reading of
//! nondeterministic automata in a line based format, and writing deterministic
//! automata as a text table, in the Aldebaran (.aut), JFLAP (.jff) and
//! GraphViz (.dot) formats.
//!

#![forbid(unsafe_code)]

mod io_aut;
mod io_dot;
mod io_jflap;
mod io_nfa;
mod io_table;
mod line_iterator;

pub use io_aut::*;
pub use io_dot::*;
pub use io_jflap::*;
pub use io_nfa::*;
pub use io_table::*;
