use std::collections::BTreeSet;
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use test_case::test_case;

use powerset_automata::construct;
use powerset_automata::random_nfa;
use powerset_automata::random_word;
use powerset_automata::Dfa;
use powerset_automata::DfaState;
use powerset_automata::Symbol;

/// Returns every state that can be reached from the initial state.
fn reachable_states(dfa: &Dfa) -> BTreeSet<DfaState> {
    let mut reached = BTreeSet::new();
    let mut queue = VecDeque::from([dfa.initial().clone()]);

    while let Some(state) = queue.pop_front() {
        if reached.insert(state.clone()) {
            for (_, to) in dfa.transitions().outgoing(&state) {
                queue.push_back(to.clone());
            }
        }
    }

    reached
}

/// Enumerates all words over the alphabet up to the given length.
fn all_words(alphabet: &[Symbol], max_length: usize) -> Vec<Vec<&str>> {
    let mut words: Vec<Vec<&str>> = vec![Vec::new()];
    let mut previous: Vec<Vec<&str>> = vec![Vec::new()];

    for _ in 0..max_length {
        let mut next = Vec::new();
        for word in &previous {
            for symbol in alphabet {
                let mut extended = word.clone();
                extended.push(symbol.as_str());
                next.push(extended);
            }
        }

        words.extend(next.iter().cloned());
        previous = next;
    }

    words
}

#[test_case(1, 5, 10, 3, 3 ; "small")]
#[test_case(2, 5, 6, 2, 4 ; "dense")]
#[test_case(3, 10, 8, 1, 2 ; "unary")]
#[test_case(4, 10, 4, 3, 1 ; "sparse")]
fn test_random_totality_and_reachability(seed: u64, iterations: usize, states: usize, symbols: u32, outdegree: usize) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..iterations {
        let nfa = random_nfa(&mut rng, states, symbols, outdegree);
        let dfa = construct(&nfa).unwrap();

        for state in dfa.states() {
            for symbol in dfa.alphabet() {
                let target = dfa
                    .transition(state, symbol)
                    .unwrap_or_else(|| panic!("{state} has no transition on {symbol}"));
                assert!(dfa.states().contains(target), "{target} is not a state");
            }
        }
        assert_eq!(dfa.num_of_transitions(), dfa.num_of_states() * dfa.alphabet().len());

        assert_eq!(&reachable_states(&dfa), dfa.states());

        if dfa.has_sink() {
            assert!(!dfa.is_accepting(&DfaState::Sink));
            for symbol in dfa.alphabet() {
                assert_eq!(dfa.transition(&DfaState::Sink, symbol), Some(&DfaState::Sink));
            }
        }

        for state in dfa.accepting() {
            let set = state.subset().expect("The sink is never accepting");
            assert!(set.iter().any(|member| nfa.is_accepting(member)));
        }
    }
}

#[test_case(5, 6, 2, 3 ; "binary")]
#[test_case(6, 4, 3, 2 ; "ternary")]
fn test_random_acceptance_equivalence(seed: u64, states: usize, symbols: u32, outdegree: usize) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..10 {
        let nfa = random_nfa(&mut rng, states, symbols, outdegree);
        let dfa = construct(&nfa).unwrap();

        let alphabet: Vec<Symbol> = nfa.alphabet().iter().cloned().collect();
        for word in all_words(&alphabet, 5) {
            assert_eq!(
                nfa.accepts(&word),
                dfa.accepts(&word),
                "The automata disagree on {word:?}"
            );
        }

        // Also try some longer words.
        for length in 6..12 {
            let word = random_word(&mut rng, &alphabet, length);
            assert_eq!(nfa.accepts(&word), dfa.accepts(&word), "The automata disagree on {word:?}");
        }
    }
}

#[test]
fn test_random_rerun_is_identical() {
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..10 {
        let nfa = random_nfa(&mut rng, 8, 2, 3);
        assert_eq!(construct(&nfa).unwrap(), construct(&nfa.clone()).unwrap());
    }
}

#[test]
fn test_random_subsets_only_contain_reachable_states() {
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..10 {
        let nfa = random_nfa(&mut rng, 8, 2, 2);
        let dfa = construct(&nfa).unwrap();

        // Collect the states reachable in the NFA by a plain graph search.
        let mut reachable: BTreeSet<&String> = BTreeSet::from([nfa.initial()]);
        let mut stack = vec![nfa.initial()];
        while let Some(state) = stack.pop() {
            for symbol in nfa.alphabet() {
                for to in nfa.transitions().destinations(state, symbol) {
                    if reachable.insert(to) {
                        stack.push(to);
                    }
                }
            }
        }

        for set in dfa.states().iter().filter_map(DfaState::subset) {
            assert!(set.iter().all(|member| reachable.contains(member)));
        }
    }
}

#[test]
fn test_independent_conversions_on_threads() {
    const THREAD_COUNT: u64 = 4;

    let results: Vec<(Dfa, Dfa)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|seed| {
                s.spawn(move || {
                    let nfa = random_nfa(&mut StdRng::seed_from_u64(seed), 8, 2, 3);
                    let dfa = construct(&nfa).unwrap();
                    (dfa, construct(&nfa).unwrap())
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for (seed, (dfa, sequential)) in results.iter().enumerate() {
        let nfa = random_nfa(&mut StdRng::seed_from_u64(seed as u64), 8, 2, 3);
        assert_eq!(dfa, sequential);
        assert_eq!(dfa, &construct(&nfa).unwrap());
    }
}
