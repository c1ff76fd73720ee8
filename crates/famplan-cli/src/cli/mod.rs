//! CLI command definitions for the `famplan` binary.
//!
//! Uses clap derive macros. `plan` answers one city, `interactive` keeps a
//! session (and its history cache) open across queries.

pub mod config;
pub mod interactive;
pub mod plan;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Ten free or low-cost family plans for any city, courtesy of an LLM.
#[derive(Parser)]
#[command(name = "famplan", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except results and errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Directory holding famplan.toml (default: $FAMPLAN_HOME or ~/.famplan).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Model to query, overriding the configuration file.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Maximum tokens to generate, overriding the configuration file.
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature, overriding the configuration file.
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend family plans for a city.
    Plan {
        /// City name (several words are joined with spaces).
        city: Vec<String>,
    },

    /// Ask for several cities in one session; repeats are served from memory.
    #[command(alias = "i")]
    Interactive,

    /// Show the effective configuration and where the token comes from.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
