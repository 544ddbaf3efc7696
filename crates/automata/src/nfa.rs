use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use thiserror::Error;

use crate::NfaState;
use crate::StateSet;
use crate::Symbol;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAutomaton {
    #[error("The initial state {0} is not a declared state")]
    UnknownInitialState(NfaState),

    #[error("Transition {from} --[{symbol}]-> {to} leads to an undeclared state")]
    UndeclaredDestination {
        from: NfaState,
        symbol: Symbol,
        to: NfaState,
    },
}

/// The transition relation of a nondeterministic automaton, mapping every
/// (state, symbol) pair to a set of destinations. Absent pairs have no
/// destinations.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NfaTransitions {
    relation: BTreeMap<NfaState, BTreeMap<Symbol, BTreeSet<NfaState>>>,
}

impl NfaTransitions {
    pub fn new() -> NfaTransitions {
        NfaTransitions::default()
    }

    /// Adds the transition from --[symbol]-> to, returns false when it was already present.
    pub fn add(&mut self, from: impl Into<NfaState>, symbol: impl Into<Symbol>, to: impl Into<NfaState>) -> bool {
        self.relation
            .entry(from.into())
            .or_default()
            .entry(symbol.into())
            .or_default()
            .insert(to.into())
    }

    /// Returns the destinations of the given state for the given symbol.
    pub fn destinations(&self, from: &str, symbol: &str) -> impl Iterator<Item = &NfaState> + '_ {
        self.relation
            .get(from)
            .and_then(|outgoing| outgoing.get(symbol))
            .into_iter()
            .flatten()
    }

    /// Iterate over all (from, symbol, to) triples in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&NfaState, &Symbol, &NfaState)> + '_ {
        self.relation.iter().flat_map(|(from, outgoing)| {
            outgoing
                .iter()
                .flat_map(move |(symbol, destinations)| destinations.iter().map(move |to| (from, symbol, to)))
        })
    }

    /// Iterate over the (from, symbol) pairs together with their destination sets.
    pub fn iter_grouped(&self) -> impl Iterator<Item = (&NfaState, &Symbol, &BTreeSet<NfaState>)> + '_ {
        self.relation.iter().flat_map(|(from, outgoing)| {
            outgoing
                .iter()
                .map(move |(symbol, destinations)| (from, symbol, destinations))
        })
    }

    /// Returns the number of (from, symbol, to) triples.
    pub fn len(&self) -> usize {
        self.relation
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merges the transitions of other into self.
    pub fn extend(&mut self, other: NfaTransitions) {
        for (from, outgoing) in other.relation {
            match self.relation.entry(from) {
                Entry::Vacant(entry) => {
                    entry.insert(outgoing);
                }
                Entry::Occupied(mut entry) => {
                    for (symbol, destinations) in outgoing {
                        entry.get_mut().entry(symbol).or_default().extend(destinations);
                    }
                }
            }
        }
    }
}

impl<F, A, T> FromIterator<(F, A, T)> for NfaTransitions
where
    F: Into<NfaState>,
    A: Into<Symbol>,
    T: Into<NfaState>,
{
    fn from_iter<I: IntoIterator<Item = (F, A, T)>>(iter: I) -> Self {
        let mut transitions = NfaTransitions::new();
        for (from, symbol, to) in iter {
            transitions.add(from, symbol, to);
        }
        transitions
    }
}

impl fmt::Debug for NfaTransitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(from, symbol, to)| format!("{from} --[{symbol}]-> {to}")))
            .finish()
    }
}

/// A nondeterministic finite automaton without epsilon transitions.
///
/// The automaton is immutable once created. It is not validated on creation,
/// see [Nfa::validate] for the checks that the subset construction performs.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa {
    states: BTreeSet<NfaState>,
    alphabet: BTreeSet<Symbol>,
    initial: NfaState,
    accepting: BTreeSet<NfaState>,
    transitions: NfaTransitions,
}

impl Nfa {
    pub fn new<S, A, F>(
        states: impl IntoIterator<Item = S>,
        alphabet: impl IntoIterator<Item = A>,
        initial: impl Into<NfaState>,
        accepting: impl IntoIterator<Item = F>,
        transitions: NfaTransitions,
    ) -> Nfa
    where
        S: Into<NfaState>,
        A: Into<Symbol>,
        F: Into<NfaState>,
    {
        Nfa {
            states: states.into_iter().map(Into::into).collect(),
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            initial: initial.into(),
            accepting: accepting.into_iter().map(Into::into).collect(),
            transitions,
        }
    }

    pub fn states(&self) -> &BTreeSet<NfaState> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn initial(&self) -> &NfaState {
        &self.initial
    }

    pub fn accepting(&self) -> &BTreeSet<NfaState> {
        &self.accepting
    }

    pub fn transitions(&self) -> &NfaTransitions {
        &self.transitions
    }

    /// Returns true iff the given state is accepting.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting.contains(state)
    }

    /// Checks that the automaton can be determinised.
    ///
    /// The initial state and every transition destination must be declared
    /// states. Transitions from undeclared states or on symbols outside of
    /// the alphabet can never be taken and are only reported.
    pub fn validate(&self) -> Result<(), InvalidAutomaton> {
        if !self.states.contains(&self.initial) {
            return Err(InvalidAutomaton::UnknownInitialState(self.initial.clone()));
        }

        for (from, symbol, to) in self.transitions.iter() {
            if !self.states.contains(to) {
                return Err(InvalidAutomaton::UndeclaredDestination {
                    from: from.clone(),
                    symbol: symbol.clone(),
                    to: to.clone(),
                });
            }
        }

        for (from, symbol, _) in self.transitions.iter_grouped() {
            if !self.states.contains(from) {
                warn!("Ignoring transitions of undeclared state {from}");
            } else if !self.alphabet.contains(symbol) {
                warn!("Ignoring transitions of {from} on symbol {symbol} outside of the alphabet");
            }
        }

        for state in self.accepting.difference(&self.states) {
            warn!("Accepting state {state} is not a declared state");
        }

        Ok(())
    }

    /// Returns the set of states reachable from any state in the given set by
    /// reading the given symbol. Symbols outside of the alphabet have no successors.
    pub fn successors<'a>(&self, states: impl IntoIterator<Item = &'a NfaState>, symbol: &str) -> StateSet {
        if !self.alphabet.contains(symbol) {
            return StateSet::default();
        }

        states
            .into_iter()
            .flat_map(|state| self.transitions.destinations(state, symbol))
            .cloned()
            .collect()
    }

    /// Runs the automaton on the given word, keeping track of the active states
    /// after every symbol.
    pub fn simulate<W: AsRef<str>>(&self, word: &[W]) -> Simulation {
        let mut active = StateSet::singleton(self.initial.clone());
        let mut steps = Vec::with_capacity(word.len());

        for symbol in word {
            active = self.successors(&active, symbol.as_ref());
            steps.push((symbol.as_ref().to_string(), active.clone()));
        }

        let accepted = active.iter().any(|state| self.is_accepting(state));
        Simulation {
            initial: StateSet::singleton(self.initial.clone()),
            steps,
            accepted,
        }
    }

    /// Returns true iff the automaton accepts the given word.
    pub fn accepts<W: AsRef<str>>(&self, word: &[W]) -> bool {
        self.simulate(word).accepts()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of symbols: {}", self.alphabet.len())?;
        write!(f, "Number of transitions: {}", self.transitions.len())
    }
}

impl fmt::Debug for Nfa {
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

/// The trace of running a nondeterministic automaton on a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    initial: StateSet,
    steps: Vec<(Symbol, StateSet)>,
    accepted: bool,
}

impl Simulation {
    /// The active states before reading the first symbol.
    pub fn initial(&self) -> &StateSet {
        &self.initial
    }

    /// Every symbol read together with the active states afterwards.
    pub fn steps(&self) -> &[(Symbol, StateSet)] {
        &self.steps
    }

    /// The active states after reading the whole word.
    pub fn last(&self) -> &StateSet {
        self.steps.last().map_or(&self.initial, |(_, active)| active)
    }

    pub fn accepts(&self) -> bool {
        self.accepted
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start in {}", self.initial)?;
        for (symbol, active) in &self.steps {
            writeln!(f, "Read '{symbol}': {active}")?;
        }

        if self.accepted {
            write!(f, "--> word accepted")
        } else {
            write!(f, "--> word not accepted")
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn binary_automaton() -> Nfa {
        Nfa::new(
            ["q1", "q2", "q3"],
            ["0", "1"],
            "q1",
            ["q1", "q3"],
            [
                ("q1", "0", "q1"),
                ("q1", "0", "q2"),
                ("q2", "0", "q1"),
                ("q2", "0", "q2"),
                ("q2", "1", "q3"),
                ("q3", "0", "q2"),
                ("q3", "1", "q3"),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_transitions_are_a_relation() {
        let mut transitions = NfaTransitions::new();
        assert!(transitions.add("q0", "a", "q1"));
        assert!(transitions.add("q0", "a", "q0"));
        assert!(!transitions.add("q0", "a", "q1"));

        assert_eq!(transitions.len(), 2);
        assert_eq!(
            transitions.destinations("q0", "a").collect::<Vec<_>>(),
            vec!["q0", "q1"]
        );
        assert_eq!(transitions.destinations("q0", "b").count(), 0);
        assert_eq!(transitions.destinations("q5", "a").count(), 0);
    }

    #[test]
    fn test_extend_merges_destinations() {
        let mut transitions: NfaTransitions = [("q0", "a", "q1")].into_iter().collect();
        transitions.extend([("q0", "a", "q2"), ("q1", "b", "q0")].into_iter().collect());

        assert_eq!(transitions.len(), 3);
        assert_eq!(transitions.destinations("q0", "a").count(), 2);
    }

    #[test]
    fn test_simulation_walkthrough() {
        let nfa = binary_automaton();
        let simulation = nfa.simulate(&["0", "0", "1", "1"]);

        assert_eq!(simulation.steps().len(), 4);
        assert_eq!(simulation.steps()[0].1.to_string(), "{q1,q2}");
        assert_eq!(simulation.last().to_string(), "{q3}");
        assert!(simulation.accepts());
    }

    #[test]
    fn test_simulation_rejects_when_stuck() {
        let nfa = binary_automaton();

        // q1 has no transition on 1.
        let simulation = nfa.simulate(&["1", "0"]);
        assert!(simulation.last().is_empty());
        assert!(!simulation.accepts());
    }

    #[test]
    fn test_empty_word() {
        let nfa = binary_automaton();
        let empty: [&str; 0] = [];

        assert!(nfa.accepts(&empty));
        assert_eq!(nfa.simulate(&empty).last(), &StateSet::singleton("q1"));
    }

    #[test]
    fn test_validate_initial_state() {
        let nfa = Nfa::new(["q0"], ["a"], "q9", ["q0"], NfaTransitions::new());

        assert_eq!(
            nfa.validate(),
            Err(InvalidAutomaton::UnknownInitialState("q9".into()))
        );
    }

    #[test]
    fn test_validate_destination() {
        let nfa = Nfa::new(
            ["q0"],
            ["a"],
            "q0",
            ["q0"],
            [("q0", "a", "q0"), ("q0", "a", "q7")].into_iter().collect(),
        );

        assert_eq!(
            nfa.validate(),
            Err(InvalidAutomaton::UndeclaredDestination {
                from: "q0".into(),
                symbol: "a".into(),
                to: "q7".into()
            })
        );
    }

    #[test]
    fn test_validate_tolerates_unused_transitions() {
        let nfa = Nfa::new(
            ["q0", "q1"],
            ["a"],
            "q0",
            ["q1", "q5"],
            [("q0", "a", "q1"), ("q0", "z", "q1"), ("q4", "a", "q0")].into_iter().collect(),
        );

        assert_eq!(nfa.validate(), Ok(()));
    }

    #[test]
    fn test_symbols_outside_alphabet_are_never_read() {
        let nfa = Nfa::new(
            ["q0", "q1"],
            ["a"],
            "q0",
            ["q1"],
            [("q0", "a", "q0"), ("q0", "z", "q1")].into_iter().collect(),
        );

        assert!(nfa.successors(&StateSet::singleton("q0"), "z").is_empty());
        assert!(!nfa.accepts(&["z"]));
        assert!(!nfa.accepts(&["a", "z"]));
    }
}
