#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use std::env;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dg: strongly connected components of dependency graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for dg.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analyze",
        about = "List strongly connected components",
        long_about = "List every strongly connected component, dependencies before dependents.",
        after_help = "EXAMPLES:\n    # Components of an edge-list file\n    dg components deps.txt\n\n    # Read from stdin\n    printf 'a b\\nb a\\n' | dg components\n\n    # Emit machine-readable output\n    dg components deps.txt --json"
    )]
    Components(cmd::components::ComponentsArgs),

    #[command(
        next_help_heading = "Analyze",
        about = "List dependency cycles",
        long_about = "List components with more than one node, plus nodes that depend on themselves.",
        after_help = "EXAMPLES:\n    # Show cycles\n    dg cycles deps.txt\n\n    # Emit machine-readable output\n    dg cycles deps.txt --format json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Analyze",
        about = "Print a dependency order",
        long_about = "Print every node with its dependencies first. Fails if the graph has a cycle.",
        after_help = "EXAMPLES:\n    # One node per line\n    dg order deps.txt --format text"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Install bash completions\n    dg completions bash > ~/.local/share/bash-completion/completions/dg"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Default log directives when `DGRAPH_LOG` is unset.
///
/// The `dg` target prefix matches both the binary and `dgraph_core`.
fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose || env::var("DEBUG").is_ok() {
        "dg=debug,info"
    } else {
        "dg=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("DGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    let format = env::var("DGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let project_root = env::current_dir()?;
    let config = config::resolve_config(&project_root)?;
    let output = output::resolve_output_mode(cli.format, cli.json, config.user.format.as_deref());
    debug!(?output, root = %project_root.display(), "resolved configuration");

    match cli.command {
        Commands::Components(ref args) => {
            cmd::components::run_components(args, output, &config.project)
        }
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, output, &config.project),
        Commands::Order(ref args) => cmd::order::run_order(args, output, &config.project),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["dg", "components", "deps.txt", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Components(_)));
    }

    #[test]
    fn format_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["dg", "--format", "text", "cycles"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
        assert!(matches!(cli.command, Commands::Cycles(_)));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["dg", "-v", "-q", "order"]).is_err());
    }

    #[test]
    fn quiet_wins_default_directives() {
        assert_eq!(default_directives(false, true), "error");
        assert_eq!(default_directives(true, false), "dg=debug,info");
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["dg", "completions"]).is_err());
        let cli = Cli::parse_from(["dg", "completions", "zsh"]);
        assert!(matches!(cli.command, Commands::Completions(_)));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
