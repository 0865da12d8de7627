//! Teardown guarantee E2E tests.
//!
//! Every run issues exactly one teardown, whichever phase it ends in.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::helpers::assertions::{assert_phases, assert_torn_down_once};
use crate::helpers::stub_provisioner::StubProvisioner;
use crate::helpers::stub_runner::StubRunner;

use tfprobe_core::config::InventoryConfig;
use tfprobe_core::types::ScenarioConfig;
use tfprobe_scenario::{
    BucketScenario, Failure, ScenarioPhase, ScenarioRunner, TeardownStatus,
};

fn bucket() -> BucketScenario {
    BucketScenario::new(ScenarioConfig::new("test_storage").var_file("terraform.tfvars"))
}

fn harness(
    provisioner: StubProvisioner,
    runner: StubRunner,
) -> (
    ScenarioRunner<StubProvisioner, StubRunner>,
    Arc<StubProvisioner>,
    Arc<StubRunner>,
) {
    let provisioner = Arc::new(provisioner);
    let runner = Arc::new(runner);
    let scenario_runner = ScenarioRunner::new(
        Arc::clone(&provisioner),
        Arc::clone(&runner),
        &InventoryConfig::default(),
    );
    (scenario_runner, provisioner, runner)
}

#[test]
fn test_e2e_successful_run_tears_down_once() {
    // Given: infrastructure whose URL shows up in the listing
    let (runner, provisioner, _) = harness(
        StubProvisioner::healthy().with_output("bucket_url", "gs://example-bucket"),
        StubRunner::succeeding("gs://example-bucket/\n"),
    );

    // When
    let outcome = runner.run(&bucket());

    // Then
    assert!(outcome.passed());
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_apply_failure_still_tears_down_once() {
    // Given: apply fails part way through
    let (runner, provisioner, commands) = harness(
        StubProvisioner::healthy().failing_apply("Error creating Bucket: 409 conflict"),
        StubRunner::succeeding(""),
    );

    // When
    let outcome = runner.run(&bucket());

    // Then: no output read, no query, one destroy
    assert!(matches!(
        outcome.failure,
        Some(Failure::Provision { ref reason }) if reason.contains("409 conflict")
    ));
    assert_eq!(provisioner.output_count(), 0);
    assert!(commands.calls().is_empty());
    assert_phases(
        &outcome,
        &[
            ScenarioPhase::Init,
            ScenarioPhase::Failed,
            ScenarioPhase::TornDown,
        ],
    );
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_output_failure_still_tears_down_once() {
    // Given: apply succeeds but the output is not declared
    let (runner, provisioner, commands) =
        harness(StubProvisioner::healthy(), StubRunner::succeeding(""));

    // When
    let outcome = runner.run(&bucket());

    // Then
    assert!(matches!(outcome.failure, Some(Failure::Output { .. })));
    assert!(commands.calls().is_empty());
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_verification_failure_still_tears_down_once() {
    // Given: the listing does not contain the bucket
    let (runner, provisioner, _) = harness(
        StubProvisioner::healthy().with_output("bucket_url", "gs://example-bucket"),
        StubRunner::succeeding("gs://other-bucket/\n"),
    );

    // When
    let outcome = runner.run(&bucket());

    // Then
    assert!(!outcome.passed());
    assert!(matches!(outcome.failure, Some(Failure::Verification { .. })));
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_panic_mid_run_still_tears_down_once() {
    // Given: the provisioner panics while outputs are read
    let (runner, provisioner, _) = harness(
        StubProvisioner::healthy().panicking_on_output(),
        StubRunner::succeeding(""),
    );
    let scenario = bucket();

    // When
    let result = panic::catch_unwind(AssertUnwindSafe(|| runner.run(&scenario)));

    // Then: the guard destroyed during unwinding
    assert!(result.is_err(), "run should have panicked");
    assert_eq!(provisioner.apply_count(), 1);
    assert_eq!(provisioner.destroy_count(), 1);
}

#[test]
fn test_e2e_teardown_failure_fails_an_otherwise_passing_run() {
    // Given: verification passes but destroy fails
    let (runner, provisioner, _) = harness(
        StubProvisioner::healthy()
            .with_output("bucket_url", "gs://example-bucket")
            .failing_destroy("bucket is not empty"),
        StubRunner::succeeding("gs://example-bucket/\n"),
    );

    // When
    let outcome = runner.run(&bucket());

    // Then: the run is not a pass and the destroy was not retried
    assert!(outcome.failure.is_none());
    assert!(matches!(
        outcome.teardown,
        TeardownStatus::Failed { ref reason } if reason.contains("bucket is not empty")
    ));
    assert!(!outcome.passed());
    assert!(
        outcome
            .failure_messages()
            .iter()
            .any(|m| m.starts_with("teardown failed"))
    );
    assert_torn_down_once(&provisioner, &outcome);
}

#[test]
fn test_e2e_each_run_gets_its_own_teardown() {
    // Given: one runner reused for two runs
    let (runner, provisioner, _) = harness(
        StubProvisioner::healthy().with_output("bucket_url", "gs://example-bucket"),
        StubRunner::succeeding("gs://example-bucket/\n"),
    );

    // When
    let first = runner.run(&bucket());
    let second = runner.run(&bucket());

    // Then: two runs, two destroys, distinct run ids
    assert!(first.passed() && second.passed());
    assert_eq!(provisioner.destroy_count(), 2);
    assert_ne!(first.run_id, second.run_id);
}
