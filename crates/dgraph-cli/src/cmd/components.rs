//! `dg components` — every strongly connected component in dependency order.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::cmd::{SourceArgs, load_graph};
use crate::config::ProjectConfig;
use crate::input::LabeledGraph;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `dg components`.
#[derive(Args, Debug, Default)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
struct ComponentsOutput {
    node_count: usize,
    edge_count: usize,
    components: Vec<ComponentView>,
}

#[derive(Debug, Serialize)]
struct ComponentView {
    members: Vec<String>,
    /// More than one member, or a single member with a self-loop.
    cycle: bool,
}

/// Execute `dg components`.
pub fn run_components(
    args: &ComponentsArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let labeled = load_graph(&args.source, &config.input, output)?;
    let payload = build_output(&labeled, config.output.sort_members);

    render_mode(output, &payload, render_components_text, render_components_pretty)
}

fn build_output(labeled: &LabeledGraph, sort_members: bool) -> ComponentsOutput {
    let graph = labeled.graph();
    let components = graph
        .strong_components()
        .iter()
        .map(|component| ComponentView {
            members: labeled.names(component, sort_members),
            cycle: graph.is_cyclic(component),
        })
        .collect();

    ComponentsOutput {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        components,
    }
}

fn render_components_text(payload: &ComponentsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for component in &payload.components {
        writeln!(w, "{}", component.members.join(" "))?;
    }
    Ok(())
}

fn render_components_pretty(
    payload: &ComponentsOutput,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Components ({}) over {} nodes, {} edges",
            payload.components.len(),
            payload.node_count,
            payload.edge_count
        ),
    )?;

    for (idx, component) in payload.components.iter().enumerate() {
        let members = component.members.join(", ");
        if component.cycle {
            writeln!(w, "{:>4}. cycle [{members}]", idx + 1)?;
        } else {
            writeln!(w, "{:>4}. {members}", idx + 1)?;
        }
    }

    Ok(())
}
