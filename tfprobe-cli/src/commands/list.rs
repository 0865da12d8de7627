//! `tfprobe list` command handler

use std::io::Write;

use serde::Serialize;

use tfprobe_core::config::{HarnessConfig, SCENARIO_NAMES};
use tfprobe_core::types::QueryErrorPolicy;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `list` command.
pub fn execute(config: &HarnessConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let list = ScenarioList::from_config(config)?;
    writer.render(&list)
}

/// Configured scenarios.
#[derive(Debug, Serialize)]
pub struct ScenarioList {
    pub scenarios: Vec<ScenarioEntry>,
}

/// One scenario as it would run.
#[derive(Debug, Serialize)]
pub struct ScenarioEntry {
    pub name: String,
    pub enabled: bool,
    pub terraform_dir: String,
    pub var_files: Vec<String>,
    pub output: String,
    /// Effective policy (configured override or scenario default).
    pub query_error_policy: QueryErrorPolicy,
}

impl ScenarioList {
    pub fn from_config(config: &HarnessConfig) -> Result<Self, CliError> {
        let mut scenarios = Vec::with_capacity(SCENARIO_NAMES.len());
        for name in SCENARIO_NAMES {
            let section = config.scenario(name).map_err(|e| CliError::Core(e.into()))?;
            let scenario =
                tfprobe_scenario::from_config(config, name).map_err(|e| CliError::Core(e.into()))?;
            scenarios.push(ScenarioEntry {
                name: name.to_owned(),
                enabled: section.enabled,
                terraform_dir: section.terraform_dir.clone(),
                var_files: section.var_files.clone(),
                output: section.output.clone(),
                query_error_policy: scenario.query_error_policy(),
            });
        }
        Ok(Self { scenarios })
    }
}

impl Render for ScenarioList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{:<10} {:<9} {:<16} {:<10} {}",
            "NAME", "ENABLED", "OUTPUT", "ON ERROR", "TERRAFORM DIR"
        )?;
        for entry in &self.scenarios {
            let enabled = if entry.enabled {
                "yes".green()
            } else {
                "no".dimmed()
            };
            writeln!(
                w,
                "{:<10} {:<9} {:<16} {:<10} {}",
                entry.name,
                enabled,
                entry.output,
                entry.query_error_policy.to_string(),
                entry.terraform_dir
            )?;
        }
        Ok(())
    }
}
