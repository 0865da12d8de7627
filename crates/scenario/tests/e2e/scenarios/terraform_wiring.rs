//! Full wiring E2E tests: real `TerraformProvisioner` over a fake CLI.
//!
//! Checks the command sequence a run issues and that terraform's JSON
//! outputs flow into the inventory query.

use std::sync::Arc;

use crate::helpers::stub_runner::FakeCloud;

use tfprobe_core::config::{HarnessConfig, InventoryConfig, TerraformConfig};
use tfprobe_core::types::{CommandOutput, ScenarioConfig};
use tfprobe_scenario::{FunctionTriggerScenario, ScenarioRunner, from_config};
use tfprobe_terraform::TerraformProvisioner;

fn runner(cloud: &Arc<FakeCloud>) -> ScenarioRunner<TerraformProvisioner<FakeCloud>, FakeCloud> {
    let provisioner = TerraformProvisioner::new(Arc::clone(cloud), TerraformConfig::default())
        .expect("default retry patterns compile");
    ScenarioRunner::new(
        Arc::new(provisioner),
        Arc::clone(cloud),
        &InventoryConfig::default(),
    )
}

#[test]
fn test_e2e_bucket_command_sequence() {
    // Given
    let cloud = Arc::new(
        FakeCloud::new(CommandOutput::success("gs://example-bucket/\n"))
            .with_output("bucket_url", "gs://example-bucket"),
    );
    let scenario = from_config(&HarnessConfig::default(), "bucket").unwrap();

    // When
    let outcome = runner(&cloud).run(scenario.as_ref());

    // Then: init, apply, output, query, destroy in that order
    assert!(outcome.passed(), "failures: {:?}", outcome.failure_messages());
    assert_eq!(
        cloud.verbs(),
        [
            "terraform init",
            "terraform apply",
            "terraform output",
            "gcloud alpha",
            "terraform destroy",
        ]
    );
    let calls = cloud.calls();
    assert!(
        calls[1]
            .arg_list()
            .windows(2)
            .any(|w| w == ["-var-file", "terraform.tfvars"])
    );
}

#[test]
fn test_e2e_function_identifier_flows_from_terraform_output() {
    // Given
    let full = "projects/demo/locations/europe-west1/functions/onUpload";
    let cloud = Arc::new(
        FakeCloud::new(CommandOutput::success(format!("name: {full}\n")))
            .with_output("cloud_function", full),
    );
    let scenario = FunctionTriggerScenario::new(ScenarioConfig::new("test_trigger_cloud_function"));

    // When
    let outcome = runner(&cloud).run(&scenario);

    // Then
    assert!(outcome.passed(), "failures: {:?}", outcome.failure_messages());
    assert_eq!(outcome.outputs.get("cloud_function"), Some(full));
    let describe = cloud
        .calls()
        .into_iter()
        .find(|spec| spec.program() == "gcloud")
        .unwrap();
    assert_eq!(
        describe.arg_list(),
        ["functions", "describe", "onUpload", "--region", "europe-west1"]
    );
}

#[test]
fn test_e2e_undeclared_terraform_output_still_destroys() {
    // Given: terraform reports the output as missing
    let cloud = Arc::new(FakeCloud::new(CommandOutput::success("")));
    let scenario = from_config(&HarnessConfig::default(), "bucket").unwrap();

    // When
    let outcome = runner(&cloud).run(scenario.as_ref());

    // Then
    assert!(!outcome.passed());
    assert_eq!(cloud.verbs().last().map(String::as_str), Some("terraform destroy"));
    assert_eq!(
        cloud
            .verbs()
            .iter()
            .filter(|v| v.as_str() == "terraform destroy")
            .count(),
        1
    );
}
