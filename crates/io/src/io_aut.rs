use std::collections::HashMap;
use std::io;
use std::io::Write;

use log::trace;

use powerset_automata::Dfa;
use powerset_automata::DfaState;

/// Writes the deterministic automaton in the Aldebaran format to the given writer.
///
/// The Aldebaran format consists of a header:
///     `des (<initial>: Nat, <num_of_transitions>: Nat, <num_of_states>: Nat)`
///
/// And one line for every transition:
///     `(<from>: Nat, "<label>": Str, <to>: Nat)`
///
/// States are numbered in presentation order. The format has no notion of
/// accepting states, these are lost. Labels cannot contain `"`, such a symbol
/// results in an [io::ErrorKind::InvalidData] error before anything is written.
pub fn write_aut(writer: &mut impl Write, dfa: &Dfa) -> io::Result<()> {
    let index: HashMap<&DfaState, usize> = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| (state, index))
        .collect();

    if let Some(symbol) = dfa.alphabet().iter().find(|symbol| symbol.contains('"')) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("The symbol {symbol} cannot be written as an Aldebaran label"),
        ));
    }

    writeln!(
        writer,
        "des ({}, {}, {})",
        index[dfa.initial()],
        dfa.num_of_transitions(),
        dfa.num_of_states()
    )?;

    for (from, symbol, to) in dfa.transitions().iter() {
        trace!("Writing transition {} --[{}]-> {}", from, symbol, to);
        writeln!(writer, "({}, \"{}\", {})", index[from], symbol, index[to])?;
    }

    Ok(())
}
