use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::DfaState;
use crate::Symbol;

/// The transition function of a deterministic automaton, every (state,
/// symbol) pair has at most one target.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DfaTransitions {
    function: BTreeMap<DfaState, BTreeMap<Symbol, DfaState>>,
}

impl DfaTransitions {
    pub fn new() -> DfaTransitions {
        DfaTransitions::default()
    }

    /// Sets the target of (from, symbol), returning the previous target if there was one.
    pub fn insert(&mut self, from: DfaState, symbol: Symbol, to: DfaState) -> Option<DfaState> {
        self.function.entry(from).or_default().insert(symbol, to)
    }

    /// Returns the target of the given state and symbol.
    pub fn get(&self, from: &DfaState, symbol: &str) -> Option<&DfaState> {
        self.function.get(from).and_then(|outgoing| outgoing.get(symbol))
    }

    /// Returns true iff the state has a transition on the given symbol.
    pub fn contains(&self, from: &DfaState, symbol: &str) -> bool {
        self.get(from, symbol).is_some()
    }

    /// Iterate over all (from, symbol, to) triples in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&DfaState, &Symbol, &DfaState)> + '_ {
        self.function
            .iter()
            .flat_map(|(from, outgoing)| outgoing.iter().map(move |(symbol, to)| (from, symbol, to)))
    }

    /// Iterate over the outgoing transitions of a single state.
    pub fn outgoing(&self, from: &DfaState) -> impl Iterator<Item = (&Symbol, &DfaState)> + '_ {
        self.function.get(from).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.function.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A deterministic finite automaton whose states are sets of states of the
/// automaton it was constructed from.
///
/// The transition function is total over `states × alphabet`. All
/// collections are ordered, so iterating the automaton always yields the same
/// sequence and two automata compare equal iff they are structurally equal.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    states: BTreeSet<DfaState>,
    alphabet: BTreeSet<Symbol>,
    initial: DfaState,
    accepting: BTreeSet<DfaState>,
    transitions: DfaTransitions,
}

impl Dfa {
    /// Creates a deterministic automaton from its parts.
    ///
    /// The caller is responsible for the transition function being total, in
    /// debug builds this is checked.
    pub fn new(
        states: BTreeSet<DfaState>,
        alphabet: BTreeSet<Symbol>,
        initial: DfaState,
        accepting: BTreeSet<DfaState>,
        transitions: DfaTransitions,
    ) -> Dfa {
        debug_assert!(states.contains(&initial), "The initial state must be a state");
        debug_assert!(
            accepting.is_subset(&states),
            "The accepting states must be a subset of the states"
        );
        debug_assert!(
            states
                .iter()
                .all(|state| alphabet.iter().all(|symbol| transitions.contains(state, symbol))),
            "The transition function must be total"
        );
        debug_assert_eq!(
            transitions.len(),
            states.len() * alphabet.len(),
            "There can be no transitions outside of states × alphabet"
        );

        Dfa {
            states,
            alphabet,
            initial,
            accepting,
            transitions,
        }
    }

    pub fn states(&self) -> &BTreeSet<DfaState> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn initial(&self) -> &DfaState {
        &self.initial
    }

    pub fn accepting(&self) -> &BTreeSet<DfaState> {
        &self.accepting
    }

    pub fn transitions(&self) -> &DfaTransitions {
        &self.transitions
    }

    /// Returns true iff the given state is accepting.
    pub fn is_accepting(&self, state: &DfaState) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the target of the given state and symbol.
    pub fn transition(&self, from: &DfaState, symbol: &str) -> Option<&DfaState> {
        self.transitions.get(from, symbol)
    }

    /// Returns true iff the sink state was needed to make the transition function total.
    pub fn has_sink(&self) -> bool {
        self.states.contains(&DfaState::Sink)
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Returns true iff the automaton accepts the given word. Words containing
    /// symbols outside of the alphabet are rejected.
    pub fn accepts<W: AsRef<str>>(&self, word: &[W]) -> bool {
        let mut current = &self.initial;
        for symbol in word {
            match self.transition(current, symbol.as_ref()) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_accepting(current)
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of symbols: {}", self.alphabet.len())?;
        write!(f, "Number of transitions: {}", self.transitions.len())
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Initial state: {}", self.initial)?;
        writeln!(f, "Accepting states: {:?}", self.accepting)?;

        for (from, symbol, to) in self.transitions.iter() {
            writeln!(f, "{from} --[{symbol}]-> {to}")?;
        }

        Ok(())
    }
}
