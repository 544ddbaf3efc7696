use rand::seq::IndexedRandom;
use rand::Rng;

use crate::Nfa;
use crate::NfaTransitions;
use crate::Symbol;

/// Generates an NFA with the given number of states and symbols, where every
/// state has at most `outdegree` outgoing transitions.
///
/// States are labelled `s0, s1, ...` with `s0` initial, and symbols are lower
/// case letters starting at `a`. Every state is accepting with probability one
/// third.
pub fn random_nfa(rng: &mut impl Rng, num_of_states: usize, num_of_symbols: u32, outdegree: usize) -> Nfa {
    assert!(num_of_states > 0, "An NFA needs at least an initial state");
    assert!(num_of_symbols <= 26, "Symbols are single lower case letters");

    let states: Vec<String> = (0..num_of_states).map(|i| format!("s{i}")).collect();
    let alphabet: Vec<Symbol> = (0..num_of_symbols)
        .filter_map(|i| char::from_digit(i + 10, 36))
        .map(String::from)
        .collect();

    let mut transitions = NfaTransitions::new();
    if !alphabet.is_empty() {
        for from in &states {
            // Introduce outgoing transitions for this state based on the desired out degree.
            for _ in 0..rng.random_range(0..=outdegree) {
                let symbol = &alphabet[rng.random_range(0..alphabet.len())];
                let to = &states[rng.random_range(0..num_of_states)];

                transitions.add(from.as_str(), symbol.as_str(), to.as_str());
            }
        }
    }

    let accepting: Vec<&String> = states.iter().filter(|_| rng.random_bool(1.0 / 3.0)).collect();

    Nfa::new(&states, &alphabet, states[0].as_str(), accepting, transitions)
}

/// Returns a word of the given length with symbols drawn from the alphabet.
pub fn random_word<'a>(rng: &mut impl Rng, alphabet: &'a [Symbol], length: usize) -> Vec<&'a str> {
    (0..length)
        .filter_map(|_| alphabet.choose(rng).map(String::as_str))
        .collect()
}
