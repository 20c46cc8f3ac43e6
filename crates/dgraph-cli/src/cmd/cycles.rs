//! `dg cycles` — list dependency cycles (strongly connected components).

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::cmd::{SourceArgs, load_graph};
use crate::config::ProjectConfig;
use crate::input::LabeledGraph;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `dg cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<String>>,
}

/// Execute `dg cycles`.
pub fn run_cycles(
    args: &CyclesArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let labeled = load_graph(&args.source, &config.input, output)?;
    let payload = build_output(&labeled, config.output.sort_members);

    render_mode(output, &payload, render_cycles_text, render_cycles_pretty)
}

fn build_output(labeled: &LabeledGraph, sort_members: bool) -> CyclesOutput {
    let cycles = labeled
        .graph()
        .cycles()
        .iter()
        .map(|cycle| labeled.names(cycle, sort_members))
        .collect();
    CyclesOutput { cycles }
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &payload.cycles {
        writeln!(w, "{}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_cycles_pretty(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    pretty_section(w, &format!("Dependency cycles ({})", payload.cycles.len()))?;

    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for name in cycle {
            writeln!(w, "  - {name}")?;
        }
    }

    Ok(())
}
