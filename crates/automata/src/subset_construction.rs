//! The subset (powerset) construction that determinises an NFA.

use std::collections::BTreeSet;
use std::collections::VecDeque;

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::Dfa;
use crate::DfaState;
use crate::DfaTransitions;
use crate::InvalidAutomaton;
use crate::Nfa;
use crate::StateSet;

/// Converts the given NFA into an equivalent DFA using the subset construction.
///
/// Every state of the result is the set of NFA states reachable by some word,
/// starting from the set containing only the initial state. Whenever no NFA
/// state is reachable the transition leads to [DfaState::Sink], which loops
/// to itself on every symbol. The resulting transition function is total.
///
/// Fails before exploring any state when the NFA does not pass [Nfa::validate].
pub fn construct(nfa: &Nfa) -> Result<Dfa, InvalidAutomaton> {
    nfa.validate()?;

    let initial = DfaState::Subset(StateSet::singleton(nfa.initial().clone()));

    let mut states: BTreeSet<DfaState> = BTreeSet::new();
    let mut accepting: BTreeSet<DfaState> = BTreeSet::new();
    let mut transitions = DfaTransitions::new();

    // States are only expanded once, duplicates in the queue are skipped when popped.
    let mut processed: FxHashSet<DfaState> = FxHashSet::default();
    let mut queue: VecDeque<DfaState> = VecDeque::new();
    queue.push_back(initial.clone());

    while let Some(current) = queue.pop_front() {
        if processed.contains(&current) {
            continue;
        }

        let DfaState::Subset(set) = &current else {
            // The sink has no NFA states, its self loops are added afterwards.
            processed.insert(DfaState::Sink);
            states.insert(DfaState::Sink);
            continue;
        };

        trace!("Exploring {current}");
        if set.iter().any(|state| nfa.is_accepting(state)) {
            accepting.insert(current.clone());
        }

        for symbol in nfa.alphabet() {
            let target = DfaState::from(nfa.successors(set, symbol));
            trace!("{current} --[{symbol}]-> {target}");

            if !processed.contains(&target) {
                queue.push_back(target.clone());
            }
            transitions.insert(current.clone(), symbol.clone(), target);
        }

        processed.insert(current.clone());
        states.insert(current);
    }

    if states.contains(&DfaState::Sink) {
        for symbol in nfa.alphabet() {
            transitions.insert(DfaState::Sink, symbol.clone(), DfaState::Sink);
        }
    }

    debug!(
        "Constructed {} states ({} accepting) and {} transitions from {} NFA states",
        states.len(),
        accepting.len(),
        transitions.len(),
        nfa.states().len()
    );

    Ok(Dfa::new(
        states,
        nfa.alphabet().clone(),
        initial,
        accepting,
        transitions,
    ))
}
