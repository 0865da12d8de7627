//! tfprobe -- provision cloud infrastructure, verify it is live, tear it down.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use tfprobe_core::config::{GeneralConfig, HarnessConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Config(args) => {
            init_logging(&GeneralConfig::default(), cli.log_level.as_deref());
            commands::config::execute(args, &cli.config, &writer)
        }
        Commands::List => {
            let config = HarnessConfig::load(&cli.config)?;
            init_logging(&config.general, cli.log_level.as_deref());
            commands::list::execute(&config, &writer)
        }
        Commands::Run(args) => {
            let config = HarnessConfig::load(&cli.config)?;
            init_logging(&config.general, cli.log_level.as_deref());
            tracing::info!(config = %cli.config.display(), "tfprobe starting");
            commands::run::execute(args, &config, &writer)
        }
    }
}

fn init_logging(general: &GeneralConfig, level_override: Option<&str>) {
    if let Err(e) = logging::init_tracing(general, level_override) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }
}
