//! Storage-triggered cloud function scenario E2E tests.

use std::sync::Arc;

use crate::helpers::assertions::assert_torn_down_once;
use crate::helpers::stub_provisioner::StubProvisioner;
use crate::helpers::stub_runner::StubRunner;

use tfprobe_core::config::InventoryConfig;
use tfprobe_core::types::{QueryStatus, ScenarioConfig};
use tfprobe_scenario::{
    Failure, FunctionTriggerScenario, ScenarioOutcome, ScenarioPhase, ScenarioRunner,
};

const FUNCTION: &str = "projects/p/locations/us-central1/functions/myFunc";

fn run_function(
    identifier: &str,
    runner: StubRunner,
) -> (ScenarioOutcome, Arc<StubProvisioner>, Arc<StubRunner>) {
    let provisioner =
        Arc::new(StubProvisioner::healthy().with_output("cloud_function", identifier));
    let runner = Arc::new(runner);
    let scenario_runner = ScenarioRunner::new(
        Arc::clone(&provisioner),
        Arc::clone(&runner),
        &InventoryConfig::default(),
    );
    let scenario = FunctionTriggerScenario::new(ScenarioConfig::new("test_trigger_cloud_function"));
    (scenario_runner.run(&scenario), provisioner, runner)
}

#[test]
fn test_e2e_function_described_by_name_and_region_passes() {
    // Given: describe output carries the full identifier
    let describe = format!("availableMemoryMb: 256\nname: {FUNCTION}\nstatus: ACTIVE\n");

    // When
    let (outcome, provisioner, runner) = run_function(FUNCTION, StubRunner::succeeding(&describe));

    // Then
    assert!(outcome.passed(), "failures: {:?}", outcome.failure_messages());
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program(), "gcloud");
    assert_eq!(
        calls[0].arg_list(),
        ["functions", "describe", "myFunc", "--region", "us-central1"]
    );
    assert_eq!(
        outcome.verification.as_ref().map(|r| r.expected.clone()),
        Some(vec![format!("name: {FUNCTION}")])
    );
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_function_query_exit_is_tolerated() {
    // Given: describe exits non-zero but still prints the name
    let stderr = format!("name: {FUNCTION}\nERROR: metadata lookup timed out\n");

    // When
    let (outcome, provisioner, _) = run_function(FUNCTION, StubRunner::exiting(2, &stderr));

    // Then: verification ran on the combined output
    assert!(outcome.passed(), "failures: {:?}", outcome.failure_messages());
    assert!(matches!(
        outcome.query.as_ref().map(|q| &q.status),
        Some(QueryStatus::Failed { status }) if status == "exit code 2"
    ));
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_function_query_spawn_failure_fails_verification() {
    // Given: gcloud cannot start; output is empty
    // When
    let (outcome, provisioner, _) =
        run_function(FUNCTION, StubRunner::unspawnable("permission denied"));

    // Then: tolerated query, but the expected name is missing
    assert_eq!(
        outcome.failure,
        Some(Failure::Verification {
            missing: vec![format!("name: {FUNCTION}")]
        })
    );
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_function_wrong_name_in_output_fails() {
    // Given: a different function is described
    let describe = "name: projects/p/locations/us-central1/functions/otherFunc\n";

    // When
    let (outcome, provisioner, _) = run_function(FUNCTION, StubRunner::succeeding(describe));

    // Then
    assert!(matches!(outcome.failure, Some(Failure::Verification { .. })));
    assert_eq!(outcome.terminal_phase(), ScenarioPhase::Failed);
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_function_short_identifier_fails_before_query() {
    // Given: the output has only five segments
    // When
    let (outcome, provisioner, runner) =
        run_function("a/b/c/d/e", StubRunner::succeeding("unused"));

    // Then: parse failure reported, no query, teardown still once
    match &outcome.failure {
        Some(Failure::Output { reason }) => {
            assert!(reason.contains("5 segments"), "reason: {reason}");
        }
        other => panic!("expected output failure, got {other:?}"),
    }
    assert!(runner.calls().is_empty());
    assert_eq!(outcome.outputs.get("cloud_function"), Some("a/b/c/d/e"));
    assert_torn_down_once(&provisioner, &outcome);
}
