use std::fs::File;
use std::io::stdout;
use std::io::BufWriter;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::info;

use nfa2dfa::report_word;
use nfa2dfa::write_dfa;
use nfa2dfa::Cli;
use powerset_automata::construct;
use powerset_io::read_nfa;
use powerset_io::write_jflap_nfa;
use powerset_utilities::Timing;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    let mut timing = Timing::new();

    let mut read_time = timing.start("read");
    let file = File::open(&cli.filename).with_context(|| format!("Cannot open {}", cli.filename))?;
    let nfa = read_nfa(file).with_context(|| format!("Cannot read {}", cli.filename))?;
    read_time.finish();
    info!("Read automaton\n{nfa}");

    let mut construct_time = timing.start("construct");
    let dfa = construct(&nfa)?;
    construct_time.finish();
    info!("Constructed automaton\n{dfa}");

    let mut write_time = timing.start("write");
    if let Some(filename) = &cli.output {
        let mut writer = BufWriter::new(File::create(filename).with_context(|| format!("Cannot create {filename}"))?);
        write_dfa(&mut writer, &dfa, cli.format)?;
        writer.flush()?;
    } else {
        write_dfa(&mut stdout().lock(), &dfa, cli.format)?;
    }

    if let Some(filename) = &cli.nfa_jflap {
        let mut writer = BufWriter::new(File::create(filename).with_context(|| format!("Cannot create {filename}"))?);
        write_jflap_nfa(&mut writer, &nfa)?;
        writer.flush()?;
    }
    write_time.finish();

    for word in &cli.words {
        report_word(&mut stdout().lock(), &nfa, &dfa, word)?;
    }

    if cli.time {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}
