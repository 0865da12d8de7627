//! Scenario execution -- the linear provision / query / verify / teardown pipeline.
//!
//! The [`ScenarioRunner`] arms a [`DeprovisionGuard`] before touching any
//! infrastructure, so exactly one teardown is issued per run whatever
//! happens in between. Failures in earlier phases are recorded on the
//! [`ScenarioOutcome`] rather than returned, because teardown still has to
//! happen and be reported.

use std::sync::Arc;
use std::time::Instant;

use metrics::counter;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use tfprobe_core::config::InventoryConfig;
use tfprobe_core::metrics as m;
use tfprobe_core::pipeline::{CommandRunner, Provisioner};
use tfprobe_core::types::{ProvisioningOutputs, QueryErrorPolicy};
use tfprobe_inventory::InventoryClient;

use crate::guard::DeprovisionGuard;
use crate::outcome::{Failure, QueryRecord, ScenarioOutcome, ScenarioPhase, TeardownStatus};
use crate::scenario::Scenario;
use crate::verify::{VerificationReport, verify};

/// Drives scenarios against a provisioner and an inventory client.
pub struct ScenarioRunner<P: Provisioner + ?Sized, R: CommandRunner> {
    provisioner: Arc<P>,
    inventory: InventoryClient<R>,
}

/// State accumulated while a run is in progress.
#[derive(Default)]
struct RunState {
    phases: Vec<ScenarioPhase>,
    outputs: ProvisioningOutputs,
    query: Option<QueryRecord>,
    verification: Option<VerificationReport>,
}

impl<P: Provisioner + ?Sized, R: CommandRunner> ScenarioRunner<P, R> {
    pub fn new(provisioner: Arc<P>, runner: Arc<R>, inventory: &InventoryConfig) -> Self {
        Self {
            provisioner,
            inventory: InventoryClient::new(runner, inventory),
        }
    }

    /// Run one scenario to completion.
    ///
    /// Never returns early without tearing down. A panic inside the run
    /// still triggers teardown from the guard's `Drop`.
    pub fn run(&self, scenario: &dyn Scenario) -> ScenarioOutcome {
        let started = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let name = scenario.name();

        let span = info_span!("scenario", scenario = name, run_id = %run_id);
        let _enter = span.enter();

        counter!(m::SCENARIO_RUNS_TOTAL, m::LABEL_SCENARIO => name.to_owned()).increment(1);
        info!(
            provisioner = self.provisioner.name(),
            dir = %scenario.config().terraform_dir().display(),
            "scenario starting"
        );

        let mut state = RunState {
            phases: vec![ScenarioPhase::Init],
            ..RunState::default()
        };

        let guard = DeprovisionGuard::arm(self.provisioner.as_ref(), scenario.config(), name);
        let failure = self.execute(scenario, &mut state).err();
        state.phases.push(if failure.is_some() {
            ScenarioPhase::Failed
        } else {
            ScenarioPhase::Verified
        });

        let teardown = match guard.teardown() {
            Ok(()) => TeardownStatus::Completed,
            Err(e) => {
                error!(error = %e, "teardown failed");
                TeardownStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        state.phases.push(ScenarioPhase::TornDown);

        let outcome = ScenarioOutcome {
            scenario: name.to_owned(),
            run_id,
            phases: state.phases,
            outputs: state.outputs,
            query: state.query,
            verification: state.verification,
            failure,
            teardown,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        let result = if outcome.passed() { "passed" } else { "failed" };
        counter!(
            m::SCENARIO_OUTCOMES_TOTAL,
            m::LABEL_SCENARIO => name.to_owned(),
            m::LABEL_RESULT => result
        )
        .increment(1);

        if outcome.passed() {
            info!(duration_ms = outcome.duration_ms, "scenario passed");
        } else {
            for message in outcome.failure_messages() {
                error!(%message, "scenario failed");
            }
        }

        outcome
    }

    fn execute(&self, scenario: &dyn Scenario, state: &mut RunState) -> Result<(), Failure> {
        let config = scenario.config();

        self.provisioner
            .init_and_apply(config)
            .map_err(|e| Failure::Provision {
                reason: e.to_string(),
            })?;
        state.phases.push(ScenarioPhase::Provisioned);
        info!("infrastructure provisioned");

        for output in scenario.output_names() {
            let value = self
                .provisioner
                .output(config, output)
                .map_err(|e| Failure::Output {
                    reason: e.to_string(),
                })?;
            info!(output, value = %value, "read output");
            state.outputs.insert(output, value);
        }

        let output_failure = |e: tfprobe_core::error::ProbeError| Failure::Output {
            reason: e.to_string(),
        };
        let query = scenario.query(&state.outputs).map_err(output_failure)?;
        let expectation = scenario.expectation(&state.outputs).map_err(output_failure)?;

        let command = self.inventory.describe(&query);
        let policy = scenario.query_error_policy();
        let result = self.inventory.query(&query);
        state.phases.push(ScenarioPhase::Queried);
        state.query = Some(QueryRecord {
            command: command.clone(),
            status: result.status.clone(),
            policy,
        });

        if let Some(error) = result.status.to_error(&command) {
            match policy {
                QueryErrorPolicy::Fatal => {
                    return Err(Failure::Query {
                        command,
                        reason: error.to_string(),
                    });
                }
                QueryErrorPolicy::Tolerate => {
                    warn!(%error, "query failed, verifying captured output anyway");
                }
            }
        }

        let report = verify(&result.output, &expectation);
        let missing = report.missing.clone();
        state.verification = Some(report);

        if missing.is_empty() {
            Ok(())
        } else {
            counter!(
                m::SCENARIO_MISSING_EXPECTATIONS_TOTAL,
                m::LABEL_SCENARIO => scenario.name().to_owned()
            )
            .increment(missing.len() as u64);
            Err(Failure::Verification { missing })
        }
    }
}
