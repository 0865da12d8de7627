//! Scoped teardown of provisioned infrastructure.
//!
//! A [`DeprovisionGuard`] is armed before any provisioning call. It issues
//! exactly one `destroy` for the scenario, either explicitly through
//! [`DeprovisionGuard::teardown`] or from `Drop` when the scope is left
//! early (error return or panic).

use metrics::counter;
use tracing::{error, info};

use tfprobe_core::error::ProbeError;
use tfprobe_core::metrics as m;
use tfprobe_core::pipeline::Provisioner;
use tfprobe_core::types::ScenarioConfig;

/// Destroys a scenario's infrastructure once, no matter how the run ends.
///
/// Teardown runs even if initialization or apply failed; a destroy on
/// partially created infrastructure is expected to be safe.
pub struct DeprovisionGuard<'a, P: Provisioner + ?Sized> {
    provisioner: &'a P,
    config: &'a ScenarioConfig,
    scenario: &'a str,
    armed: bool,
}

impl<'a, P: Provisioner + ?Sized> DeprovisionGuard<'a, P> {
    /// Arm a guard for `config`.
    pub fn arm(provisioner: &'a P, config: &'a ScenarioConfig, scenario: &'a str) -> Self {
        Self {
            provisioner,
            config,
            scenario,
            armed: true,
        }
    }

    /// Destroy now and report the result.
    ///
    /// Consumes the guard, so `Drop` will not destroy a second time.
    pub fn teardown(mut self) -> Result<(), ProbeError> {
        self.armed = false;
        destroy(self.provisioner, self.config, self.scenario)
    }
}

impl<P: Provisioner + ?Sized> Drop for DeprovisionGuard<'_, P> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;

        if std::thread::panicking() {
            error!(scenario = self.scenario, "scenario panicked, tearing down");
        }
        if let Err(e) = destroy(self.provisioner, self.config, self.scenario) {
            error!(scenario = self.scenario, error = %e, "teardown failed during unwind");
        }
    }
}

fn destroy<P: Provisioner + ?Sized>(
    provisioner: &P,
    config: &ScenarioConfig,
    scenario: &str,
) -> Result<(), ProbeError> {
    info!(
        scenario,
        provisioner = provisioner.name(),
        dir = %config.terraform_dir().display(),
        "tearing down"
    );
    counter!(m::SCENARIO_TEARDOWNS_TOTAL, m::LABEL_SCENARIO => scenario.to_owned()).increment(1);

    let result = provisioner.destroy(config);
    if result.is_err() {
        counter!(m::SCENARIO_TEARDOWN_FAILURES_TOTAL, m::LABEL_SCENARIO => scenario.to_owned())
            .increment(1);
    }
    result
}
