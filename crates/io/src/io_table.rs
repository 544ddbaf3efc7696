use std::io;
use std::io::Write;

use itertools::Itertools;

use powerset_automata::Dfa;

/// Writes a human readable report of the deterministic automaton, consisting
/// of the initial state, the accepting states and the transition table.
///
/// Rows are sorted by source state and then by symbol.
pub fn write_table(writer: &mut impl Write, dfa: &Dfa) -> io::Result<()> {
    writeln!(writer, "Initial state: {}", dfa.initial())?;
    if dfa.accepting().is_empty() {
        writeln!(writer, "Accepting states: none")?;
    } else {
        writeln!(writer, "Accepting states: {}", dfa.accepting().iter().format(" "))?;
    }
    writeln!(writer)?;

    let state_width = dfa
        .states()
        .iter()
        .map(|state| state.to_string().chars().count())
        .max()
        .unwrap_or_default()
        .max("STATE".len());
    let symbol_width = dfa
        .alphabet()
        .iter()
        .map(|symbol| symbol.chars().count())
        .max()
        .unwrap_or_default()
        .max("SYMBOL".len());

    writeln!(writer, "{:<state_width$} | {:<symbol_width$} | TARGET", "STATE", "SYMBOL")?;
    let target_width = state_width.max("TARGET".len());
    writeln!(writer, "{}", "-".repeat(state_width + symbol_width + target_width + 6))?;

    for (from, symbol, to) in dfa.transitions().iter() {
        writeln!(
            writer,
            "{:<state_width$} | {:<symbol_width$} | {}",
            from.to_string(),
            symbol,
            to
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use powerset_automata::construct;
    use powerset_automata::Nfa;

    use super::*;

    #[test]
    fn test_write_table() {
        let nfa = Nfa::new(
            ["q0", "q1"],
            ["a"],
            "q0",
            ["q1"],
            [("q0", "a", "q0"), ("q0", "a", "q1")].into_iter().collect(),
        );
        let dfa = construct(&nfa).unwrap();

        let mut output = Vec::new();
        write_table(&mut output, &dfa).unwrap();

        let expected = indoc! {"
            Initial state: {q0}
            Accepting states: {q0,q1}

            STATE   | SYMBOL | TARGET
            --------------------------
            {q0}    | a      | {q0,q1}
            {q0,q1} | a      | {q0,q1}
        "};
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
