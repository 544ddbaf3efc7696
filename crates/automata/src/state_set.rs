use std::fmt;

use itertools::Itertools;

/// The label of a state in a nondeterministic automaton.
pub type NfaState = String;

/// A symbol of the input alphabet, compared by value.
pub type Symbol = String;

/// A canonical set of NFA states, used as the identity of a DFA state.
///
/// The members are kept sorted and deduplicated, so equality, hashing and
/// ordering only depend on which labels are contained and never on the order
/// in which they were inserted. We use a sorted vector instead of a hash set
/// since these sets are hashed and compared far more often than modified.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    members: Vec<NfaState>,
}

impl StateSet {
    /// Returns the set containing exactly the given state.
    pub fn singleton(state: impl Into<NfaState>) -> StateSet {
        StateSet {
            members: vec![state.into()],
        }
    }

    /// Returns true iff the given state is a member of this set.
    pub fn contains(&self, state: &str) -> bool {
        self.members
            .binary_search_by(|member| member.as_str().cmp(state))
            .is_ok()
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &NfaState> + '_ {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<S: Into<NfaState>> FromIterator<S> for StateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut members: Vec<NfaState> = iter.into_iter().map(Into::into).collect();
        members.sort_unstable();
        members.dedup();

        StateSet { members }
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a NfaState;
    type IntoIter = std::slice::Iter<'a, NfaState>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.members.iter().format(","))
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The label used to present the sink state.
pub const SINK_LABEL: &str = "⊥";

/// A state of the deterministic automaton produced by the subset construction.
///
/// The sink is a separate variant so that it can never be confused with a
/// subset that happens to contain a state labelled [SINK_LABEL]. Subsets are
/// ordered by their members and all of them come before the sink.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DfaState {
    /// A non-empty set of reachable NFA states.
    Subset(StateSet),

    /// The absorbing state reached when no NFA state is active.
    Sink,
}

impl DfaState {
    /// Returns the underlying set of NFA states, or None for the sink.
    pub fn subset(&self) -> Option<&StateSet> {
        match self {
            DfaState::Subset(set) => Some(set),
            DfaState::Sink => None,
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, DfaState::Sink)
    }
}

impl From<StateSet> for DfaState {
    /// The empty set of NFA states is represented by the sink.
    fn from(set: StateSet) -> Self {
        if set.is_empty() {
            DfaState::Sink
        } else {
            DfaState::Subset(set)
        }
    }
}

impl fmt::Display for DfaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DfaState::Subset(set) => write!(f, "{set}"),
            DfaState::Sink => write!(f, "{SINK_LABEL}"),
        }
    }
}

impl fmt::Debug for DfaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
