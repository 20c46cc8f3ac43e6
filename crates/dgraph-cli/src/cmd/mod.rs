pub mod completions;
pub mod components;
pub mod cycles;
pub mod order;

use std::path::PathBuf;

use clap::Args;

use crate::config::InputConfig;
use crate::input::{LabeledGraph, read_source};
use crate::output::{CliError, OutputMode, render_error};

/// Where the edge list comes from; shared by every graph command.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Edge-list file. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

/// Read and parse the edge list named by `source`.
///
/// Parse errors are rendered to stderr in the requested mode before being
/// returned.
pub fn load_graph(
    source: &SourceArgs,
    input: &InputConfig,
    output: OutputMode,
) -> anyhow::Result<LabeledGraph> {
    let text = read_source(source.file.as_deref())?;
    match LabeledGraph::parse(&text, input) {
        Ok(graph) => Ok(graph),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}
