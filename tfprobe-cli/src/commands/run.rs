//! `tfprobe run` command handler

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use tfprobe_core::config::{HarnessConfig, SCENARIO_NAMES};
use tfprobe_core::error::ConfigError;
use tfprobe_core::pipeline::{CommandRunner, Provisioner};
use tfprobe_inventory::SystemCommandRunner;
use tfprobe_scenario::{Scenario, ScenarioOutcome, ScenarioRunner, TeardownStatus};
use tfprobe_terraform::TerraformProvisioner;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command against real terraform and gcloud binaries.
pub fn execute(args: RunArgs, config: &HarnessConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let scenarios = build_scenarios(&args.scenarios, config)?;

    let commands = Arc::new(SystemCommandRunner::new());
    let provisioner = TerraformProvisioner::new(Arc::clone(&commands), config.terraform.clone())?;
    let runner = ScenarioRunner::new(Arc::new(provisioner), commands, &config.inventory);

    let report = run_all(&runner, &scenarios, args.fail_fast);
    writer.render(&report)?;

    if report.failed > 0 {
        return Err(CliError::ScenariosFailed {
            failed: report.failed,
            total: report.outcomes.len() + report.skipped.len(),
        });
    }
    Ok(())
}

/// Resolve requested names into scenarios.
///
/// An empty request selects every enabled scenario. Explicitly named
/// scenarios run even when disabled in the config, so every selected
/// section is validated here. Duplicates are dropped.
pub fn build_scenarios(
    requested: &[String],
    config: &HarnessConfig,
) -> Result<Vec<Box<dyn Scenario>>, CliError> {
    let names: Vec<&str> = if requested.is_empty() {
        config.enabled_scenarios()
    } else {
        let mut names = Vec::new();
        for name in requested {
            if !SCENARIO_NAMES.contains(&name.as_str()) {
                return Err(config_error(ConfigError::UnknownScenario(name.clone())));
            }
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    };

    if names.is_empty() {
        return Err(CliError::Command(
            "no scenarios enabled; name one explicitly or enable it in the config".to_owned(),
        ));
    }

    names
        .into_iter()
        .map(|name| {
            config.scenario(name)?.validate(name)?;
            tfprobe_scenario::from_config(config, name)
        })
        .collect::<Result<_, ConfigError>>()
        .map_err(config_error)
}

fn config_error(e: ConfigError) -> CliError {
    CliError::Core(e.into())
}

/// Run scenarios in order and collect their outcomes.
pub fn run_all<P, R>(
    runner: &ScenarioRunner<P, R>,
    scenarios: &[Box<dyn Scenario>],
    fail_fast: bool,
) -> RunReport
where
    P: Provisioner + ?Sized,
    R: CommandRunner,
{
    let mut report = RunReport::default();

    for (index, scenario) in scenarios.iter().enumerate() {
        let outcome = runner.run(scenario.as_ref());
        let passed = outcome.passed();
        report.record(outcome);

        if !passed && fail_fast {
            report.skipped = scenarios[index + 1..]
                .iter()
                .map(|s| s.name().to_owned())
                .collect();
            if !report.skipped.is_empty() {
                warn!(skipped = ?report.skipped, "fail-fast: skipping remaining scenarios");
            }
            break;
        }
    }

    info!(
        passed = report.passed,
        failed = report.failed,
        skipped = report.skipped.len(),
        "run complete"
    );
    report
}

/// Aggregate result of `tfprobe run`.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub passed: usize,
    pub failed: usize,
    pub skipped: Vec<String>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    fn record(&mut self, outcome: ScenarioOutcome) {
        if outcome.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for outcome in &self.outcomes {
            let status = if outcome.passed() {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            let short_id: String = outcome.run_id.chars().take(8).collect();
            writeln!(
                w,
                "{status} {} (run {short_id}, {:.1}s)",
                outcome.scenario.bold(),
                outcome.duration_ms as f64 / 1000.0
            )?;

            if !outcome.passed() {
                writeln!(w, "  reached: {}", outcome.terminal_phase())?;
            }
            for (name, value) in outcome.outputs.iter() {
                writeln!(w, "  output {name} = {value}")?;
            }
            if let Some(query) = &outcome.query {
                writeln!(w, "  query: {} ({})", query.command, query.policy)?;
            }
            for message in outcome.failure_messages() {
                writeln!(w, "  - {}", message.red())?;
            }
            match &outcome.teardown {
                TeardownStatus::Completed => writeln!(w, "  teardown: completed")?,
                TeardownStatus::Failed { .. } => {
                    writeln!(w, "  teardown: {}", "FAILED".red().bold())?;
                }
            }
        }

        for name in &self.skipped {
            writeln!(w, "{} {}", "SKIP".yellow().bold(), name.bold())?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "Summary: {} passed, {} failed, {} skipped",
            self.passed,
            self.failed,
            self.skipped.len()
        )?;
        Ok(())
    }
}
