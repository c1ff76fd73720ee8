//! Famplan CLI entry point.
//!
//! Binary name: `famplan`
//!
//! Parses CLI arguments, sets up tracing, wires the plan service, then
//! dispatches to the command handler.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use famplan_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

/// Map `-v` / `--quiet` to a default filter (`RUST_LOG` still wins).
fn filter_for(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,famplan=debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(filter_for(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: could not initialise logging: {e}");
    }

    // Flush exporters on every exit path, errors included.
    let result = run(&cli).await;
    shutdown_tracing();
    result
}

/// Dispatch the parsed command.
async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "famplan", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let state = AppState::init(cli).await?;

    let code = match &cli.command {
        Commands::Plan { city } => {
            cli::plan::run(&state, &city.join(" "), cli.json, cli.quiet).await?
        }
        Commands::Interactive => cli::interactive::run(&state, cli.quiet).await?,
        Commands::Config => {
            cli::config::show(&state, cli.json).await?;
            ExitCode::SUCCESS
        }
        Commands::Completions { .. } => ExitCode::SUCCESS,
    };

    Ok(code)
}
