//! `dg order` — a flat dependency order, failing on the first cycle.

use std::io::Write;

use clap::Args;
use dgraph_core::GraphError;
use serde::Serialize;

use crate::cmd::{SourceArgs, load_graph};
use crate::config::ProjectConfig;
use crate::input::LabeledGraph;
use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `dg order`.
#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
struct OrderOutput {
    order: Vec<String>,
}

/// Execute `dg order`.
///
/// # Errors
///
/// Fails after rendering a `cycle_detected` error if the graph has a cycle.
pub fn run_order(args: &OrderArgs, output: OutputMode, config: &ProjectConfig) -> anyhow::Result<()> {
    let labeled = load_graph(&args.source, &config.input, output)?;

    match labeled.graph().topological_order() {
        Ok(order) => {
            let payload = OrderOutput {
                order: labeled.names(&order, false),
            };
            render_mode(output, &payload, render_order_text, render_order_pretty)
        }
        Err(err) => {
            render_error(output, &cycle_error(&labeled, &err))?;
            anyhow::bail!("no dependency order: graph has a cycle");
        }
    }
}

/// Restate a cycle error with node names instead of ids.
fn cycle_error(labeled: &LabeledGraph, err: &GraphError) -> CliError {
    let mut cli = CliError::from(err);
    if let GraphError::Cycle { members } = err {
        cli.message = format!(
            "dependency cycle among {}",
            labeled.names(members, true).join(", ")
        );
    }
    cli
}

fn render_order_text(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for name in &payload.order {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

fn render_order_pretty(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Dependency order ({} nodes)", payload.order.len()))?;
    for (idx, name) in payload.order.iter().enumerate() {
        writeln!(w, "{:>4}. {name}", idx + 1)?;
    }
    Ok(())
}
