//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// tfprobe -- provision cloud infrastructure, verify it is live, tear it down.
///
/// Use `tfprobe <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "tfprobe", version, about, long_about = None)]
pub struct Cli {
    /// Path to the tfprobe.toml configuration file.
    #[arg(short, long, default_value = "tfprobe.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios: provision, query, verify, tear down.
    Run(RunArgs),

    /// List configured scenarios.
    List,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run one or more scenarios.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenarios to run (bucket, function). Defaults to every enabled scenario.
    pub scenarios: Vec<String>,

    /// Stop after the first failing scenario.
    #[arg(long)]
    pub fail_fast: bool,
}

// ---- config ----

/// Manage tfprobe configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, terraform, inventory, scenarios).
        #[arg(long)]
        section: Option<String>,
    },
}
