use std::collections::HashMap;
use std::f64::consts::PI;
use std::io;
use std::io::Write;

use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;
use log::warn;

use powerset_automata::Dfa;
use powerset_automata::DfaState;
use powerset_automata::Nfa;

/// A state as it is presented in a JFLAP file.
struct JflapState {
    name: String,
    label: String,
    initial: bool,
    accepting: bool,
}

/// Writes the deterministic automaton as a JFLAP 7 finite automaton (.jff).
///
/// States are named `q0, q1, ...` in presentation order and carry the set of
/// NFA states they represent as label.
pub fn write_jflap(writer: &mut impl Write, dfa: &Dfa) -> io::Result<()> {
    let index: HashMap<&DfaState, usize> = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| (state, index))
        .collect();

    let states: Vec<JflapState> = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| JflapState {
            name: format!("q{index}"),
            label: state.to_string(),
            initial: state == dfa.initial(),
            accepting: dfa.is_accepting(state),
        })
        .collect();

    let transitions = dfa
        .transitions()
        .iter()
        .map(|(from, symbol, to)| (index[from], index[to], symbol.as_str()));

    write_structure(writer, &states, transitions)
}

/// Writes the nondeterministic automaton as a JFLAP 7 finite automaton (.jff).
///
/// Transitions from or to undeclared states cannot be presented and are skipped.
pub fn write_jflap_nfa(writer: &mut impl Write, nfa: &Nfa) -> io::Result<()> {
    let index: HashMap<&str, usize> = nfa
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| (state.as_str(), index))
        .collect();

    let states: Vec<JflapState> = nfa
        .states()
        .iter()
        .map(|state| JflapState {
            name: state.clone(),
            label: state.clone(),
            initial: state == nfa.initial(),
            accepting: nfa.is_accepting(state),
        })
        .collect();

    let transitions = nfa.transitions().iter().filter_map(|(from, symbol, to)| {
        match (index.get(from.as_str()), index.get(to.as_str())) {
            (Some(from), Some(to)) => Some((*from, *to, symbol.as_str())),
            _ => {
                warn!("Skipping transition {from} --[{symbol}]-> {to} between undeclared states");
                None
            }
        }
    });

    write_structure(writer, &states, transitions)
}

/// Writes the structure element, placing the states on a circle.
fn write_structure<'a>(
    writer: &mut impl Write,
    states: &[JflapState],
    transitions: impl Iterator<Item = (usize, usize, &'a str)>,
) -> io::Result<()> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>")?;
    writeln!(writer, "<structure>")?;
    writeln!(writer, "  <type>fa</type>")?;
    writeln!(writer, "  <automaton>")?;

    for (index, state) in states.iter().enumerate() {
        let (x, y) = circle_position(index, states.len());

        writeln!(
            writer,
            "    <state id=\"{}\" name=\"{}\">",
            index,
            encode_double_quoted_attribute(&state.name)
        )?;
        writeln!(writer, "      <x>{x}</x>")?;
        writeln!(writer, "      <y>{y}</y>")?;
        writeln!(writer, "      <label>{}</label>", encode_text(&state.label))?;
        if state.initial {
            writeln!(writer, "      <initial/>")?;
        }
        if state.accepting {
            writeln!(writer, "      <final/>")?;
        }
        writeln!(writer, "    </state>")?;
    }

    for (from, to, symbol) in transitions {
        writeln!(writer, "    <transition>")?;
        writeln!(writer, "      <from>{from}</from>")?;
        writeln!(writer, "      <to>{to}</to>")?;
        writeln!(writer, "      <read>{}</read>", encode_text(symbol))?;
        writeln!(writer, "    </transition>")?;
    }

    writeln!(writer, "  </automaton>")?;
    writeln!(writer, "</structure>")
}

/// Returns the position of the state with the given index when `count` states
/// are evenly spread over a circle around (200, 200).
fn circle_position(index: usize, count: usize) -> (i64, i64) {
    let radius = (30 * count).min(150) as f64;
    let angle = 2.0 * PI * index as f64 / count as f64;

    (
        (200.0 + radius * angle.cos()) as i64,
        (200.0 + radius * angle.sin()) as i64,
    )
}
