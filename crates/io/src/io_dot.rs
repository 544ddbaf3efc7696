use std::collections::BTreeMap;
use std::collections::HashMap;
use std::io;
use std::io::Write;

use itertools::Itertools;

use powerset_automata::Dfa;
use powerset_automata::DfaState;

/// Writes the deterministic automaton as a GraphViz digraph.
///
/// Accepting states are drawn as double circles and the initial state has an
/// incoming edge from an invisible node. Parallel transitions are merged into
/// a single edge labelled with all their symbols.
pub fn write_dot(writer: &mut impl Write, dfa: &Dfa) -> io::Result<()> {
    let index: HashMap<&DfaState, usize> = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| (state, index))
        .collect();

    writeln!(writer, "digraph {{")?;
    writeln!(writer, "  rankdir=LR;")?;
    writeln!(writer, "  start [shape=point style=invis];")?;

    for (i, state) in dfa.states().iter().enumerate() {
        let shape = if dfa.is_accepting(state) { "doublecircle" } else { "circle" };
        writeln!(
            writer,
            "  s{} [shape={} label=\"{}\"];",
            i,
            shape,
            html_escape::encode_double_quoted_attribute(&state.to_string())
        )?;
    }

    writeln!(writer, "  start -> s{};", index[dfa.initial()])?;

    let mut edges: BTreeMap<(usize, usize), Vec<&str>> = BTreeMap::new();
    for (from, symbol, to) in dfa.transitions().iter() {
        edges.entry((index[from], index[to])).or_default().push(symbol);
    }

    for ((from, to), symbols) in edges {
        writeln!(
            writer,
            "  s{} -> s{} [label=\"{}\"];",
            from,
            to,
            symbols
                .iter()
                .format_with(",", |symbol, f| f(&html_escape::encode_double_quoted_attribute(symbol)))
        )?;
    }

    writeln!(writer, "}}")
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use powerset_automata::construct;
    use powerset_automata::Nfa;

    use super::*;

    #[test]
    fn test_write_dot() {
        let nfa = Nfa::new(
            ["q0", "q1"],
            ["a", "b"],
            "q0",
            ["q1"],
            [("q0", "a", "q1")].into_iter().collect(),
        );
        let dfa = construct(&nfa).unwrap();

        let mut output = Vec::new();
        write_dot(&mut output, &dfa).unwrap();

        let expected = indoc! {r#"
            digraph {
              rankdir=LR;
              start [shape=point style=invis];
              s0 [shape=circle label="{q0}"];
              s1 [shape=doublecircle label="{q1}"];
              s2 [shape=circle label="⊥"];
              start -> s0;
              s0 -> s1 [label="a"];
              s0 -> s2 [label="b"];
              s1 -> s2 [label="a,b"];
              s2 -> s2 [label="a,b"];
            }
        "#};
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
