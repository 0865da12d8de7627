//! Outcome assertion helpers for E2E tests.

use tfprobe_scenario::{ScenarioOutcome, ScenarioPhase};

use super::stub_provisioner::StubProvisioner;

/// Assert that exactly one teardown was issued and recorded.
///
/// # Panics
///
/// Panics if `destroy` was not called exactly once or the outcome does
/// not end in `TornDown`.
#[allow(dead_code)]
pub fn assert_torn_down_once(provisioner: &StubProvisioner, outcome: &ScenarioOutcome) {
    assert_eq!(
        provisioner.destroy_count(),
        1,
        "expected exactly one destroy, got {}",
        provisioner.destroy_count()
    );
    assert_eq!(
        outcome.phases.last(),
        Some(&ScenarioPhase::TornDown),
        "run should end torn down: {:?}",
        outcome.phases
    );
}

/// Assert the full phase sequence.
#[allow(dead_code)]
pub fn assert_phases(outcome: &ScenarioOutcome, expected: &[ScenarioPhase]) {
    assert_eq!(
        outcome.phases, expected,
        "unexpected phase sequence for '{}'",
        outcome.scenario
    );
}
