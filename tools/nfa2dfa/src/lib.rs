use std::io;
use std::io::Write;

use anyhow::ensure;
use clap::ValueEnum;

use powerset_automata::Dfa;
use powerset_automata::Nfa;
use powerset_io::write_aut;
use powerset_io::write_dot;
use powerset_io::write_jflap;
use powerset_io::write_table;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// A human readable transition table.
    #[default]
    Table,
    /// The Aldebaran format.
    Aut,
    /// A JFLAP 7 finite automaton.
    Jflap,
    /// A GraphViz digraph.
    Dot,
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "nfa2dfa",
    about = "Converts a nondeterministic finite automaton into a deterministic one"
)]
pub struct Cli {
    /// The nondeterministic automaton in the line based format.
    #[arg(value_name = "FILE")]
    pub filename: String,

    /// Write the deterministic automaton to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Also export the input automaton as a JFLAP file.
    #[arg(long, value_name = "FILE")]
    pub nfa_jflap: Option<String>,

    /// Simulate the input automaton on this word, symbols are separated by
    /// commas or otherwise single characters.
    #[arg(short, long = "word")]
    pub words: Vec<String>,

    /// Print the time spent in every phase.
    #[arg(long)]
    pub time: bool,
}

/// Writes the deterministic automaton in the given format.
pub fn write_dfa(writer: &mut impl Write, dfa: &Dfa, format: Format) -> io::Result<()> {
    match format {
        Format::Table => write_table(writer, dfa),
        Format::Aut => write_aut(writer, dfa),
        Format::Jflap => write_jflap(writer, dfa),
        Format::Dot => write_dot(writer, dfa),
    }
}

/// Splits a word given on the command line into its symbols.
pub fn split_word(word: &str) -> Vec<String> {
    if word.contains(',') {
        word.split(',')
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
            .map(String::from)
            .collect()
    } else {
        word.chars().map(String::from).collect()
    }
}

/// Writes the walkthrough of the nondeterministic automaton on the given word
/// and returns whether it was accepted.
///
/// Fails when the deterministic automaton disagrees with the nondeterministic one.
pub fn report_word(writer: &mut impl Write, nfa: &Nfa, dfa: &Dfa, word: &str) -> anyhow::Result<bool> {
    let symbols = split_word(word);
    let simulation = nfa.simulate(&symbols);

    writeln!(writer, "Word \"{word}\":")?;
    writeln!(writer, "{simulation}")?;

    ensure!(
        simulation.accepts() == dfa.accepts(&symbols),
        "The deterministic automaton disagrees on \"{word}\""
    );

    Ok(simulation.accepts())
}
