use std::io::Read;

use log::debug;
use log::trace;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use thiserror::Error;

use powerset_automata::Nfa;
use powerset_automata::NfaState;
use powerset_automata::NfaTransitions;
use powerset_automata::Symbol;

use crate::line_iterator::LineIterator;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("Missing header line, expected {0}")]
    MissingHeader(&'static str),

    #[error("Expected a single initial state on line {line_number}, found \"{line}\"")]
    InvalidInitialState { line_number: usize, line: String },

    #[error("Invalid transition on line {line_number}: \"{line}\"")]
    InvalidTransition { line_number: usize, line: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The header lines in the order in which they must occur.
const HEADER: [&str; 4] = [
    "the comma separated states",
    "the comma separated alphabet",
    "the initial state",
    "the comma separated accepting states",
];

/// Loads a nondeterministic automaton in the line based format from the given reader.
///
/// The format consists of four header lines followed by the transitions:
///     `<state>, <state>, ...`
///     `<symbol>, <symbol>, ...`
///     `<initial state>`
///     `<accepting state>, ...` or `-` when there are none
///
/// And one line for every transition in either of the forms:
///     `<from>, <symbol>, <to>`
///     `<from>, <symbol> -> <to> | <to> ...; <from>, <symbol> -> ...`
///
/// Blank lines and lines starting with `#` are ignored. The result is not
/// validated, that is left to the construction that consumes it.
pub fn read_nfa(reader: impl Read) -> Result<Nfa, IOError> {
    // Regex for <from>, <symbol>, <to>
    let transition_regex = Regex::new(r#"^\s*([^,;|]+?)\s*,\s*([^,;|]+?)\s*,\s*([^,;|]+?)\s*$"#)
        .expect("Regex compilation should not fail");

    // Regex for <from>, <symbol> -> <to> | ... | <to>
    let multi_transition_regex = Regex::new(r#"^\s*([^,;|]+?)\s*,\s*([^,;|]+?)\s*->\s*([^,;]+?)\s*$"#)
        .expect("Regex compilation should not fail");

    let mut lines = LineIterator::new(reader);
    let mut header: Vec<(usize, String)> = Vec::with_capacity(HEADER.len());
    let mut transitions = NfaTransitions::new();

    while let Some(line) = lines.next() {
        let content = line.trim().to_string();
        let line_number = lines.line_number();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        if header.len() < HEADER.len() {
            header.push((line_number, content));
            continue;
        }

        trace!("{}", content);
        let invalid = || IOError::InvalidTransition {
            line_number,
            line: content.clone(),
        };

        if content.contains("->") {
            for entry in content.split(';').filter(|entry| !entry.trim().is_empty()) {
                let (_, [from, symbol, destinations]) = multi_transition_regex.captures(entry).ok_or_else(invalid)?.extract();

                for to in destinations.split('|').map(str::trim) {
                    if to.is_empty() {
                        return Err(invalid());
                    }

                    trace!("Read transition {} --[{}]-> {}", from, symbol, to);
                    transitions.add(from, symbol, to);
                }
            }
        } else {
            let (_, [from, symbol, to]) = transition_regex.captures(&content).ok_or_else(invalid)?.extract();

            trace!("Read transition {} --[{}]-> {}", from, symbol, to);
            transitions.add(from, symbol, to);
        }
    }

    if let Some(error) = lines.take_error() {
        return Err(error.into());
    }

    if header.len() < HEADER.len() {
        return Err(IOError::MissingHeader(HEADER[header.len()]));
    }

    let states: Vec<NfaState> = split_list(&header[0].1);
    let alphabet: Vec<Symbol> = split_list(&header[1].1);

    let (initial_line_number, initial_line) = &header[2];
    let initial = match split_list(initial_line).as_slice() {
        [initial] => initial.clone(),
        _ => {
            return Err(IOError::InvalidInitialState {
                line_number: *initial_line_number,
                line: initial_line.clone(),
            })
        }
    };

    let accepting: Vec<NfaState> = if header[3].1 == "-" {
        Vec::new()
    } else {
        split_list(&header[3].1)
    };

    debug!(
        "Read {} states, {} symbols and {} transitions",
        states.len(),
        alphabet.len(),
        transitions.len()
    );

    Ok(Nfa::new(states, alphabet, initial, accepting, transitions))
}

/// Splits a comma separated list, ignoring empty entries.
fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
