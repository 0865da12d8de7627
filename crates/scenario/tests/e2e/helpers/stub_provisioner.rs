//! Counting stub provisioner for E2E tests.
//!
//! Records every call so tests can assert that teardown happened exactly
//! once, and supports failure injection at each step.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use tfprobe_core::error::{ProbeError, ProvisionError};
use tfprobe_core::pipeline::Provisioner;
use tfprobe_core::types::ScenarioConfig;

/// A provisioner that never touches real infrastructure.
pub struct StubProvisioner {
    /// Number of `init_and_apply` calls.
    pub applies: AtomicUsize,
    /// Number of `output` calls.
    pub output_reads: AtomicUsize,
    /// Number of `destroy` calls.
    pub destroys: AtomicUsize,
    outputs: BTreeMap<String, String>,
    apply_error: Option<String>,
    destroy_error: Option<String>,
    panic_on_output: bool,
}

#[allow(dead_code)]
impl StubProvisioner {
    /// A provisioner that succeeds and exposes no outputs.
    pub fn healthy() -> Self {
        Self {
            applies: AtomicUsize::new(0),
            output_reads: AtomicUsize::new(0),
            destroys: AtomicUsize::new(0),
            outputs: BTreeMap::new(),
            apply_error: None,
            destroy_error: None,
            panic_on_output: false,
        }
    }

    /// Expose an output value after apply.
    pub fn with_output(mut self, name: &str, value: &str) -> Self {
        self.outputs.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Make `init_and_apply` fail.
    pub fn failing_apply(mut self, reason: &str) -> Self {
        self.apply_error = Some(reason.to_owned());
        self
    }

    /// Make `destroy` fail.
    pub fn failing_destroy(mut self, reason: &str) -> Self {
        self.destroy_error = Some(reason.to_owned());
        self
    }

    /// Panic while reading outputs.
    pub fn panicking_on_output(mut self) -> Self {
        self.panic_on_output = true;
        self
    }

    pub fn apply_count(&self) -> usize {
        self.applies.load(Ordering::SeqCst)
    }

    pub fn output_count(&self) -> usize {
        self.output_reads.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }
}

impl Provisioner for StubProvisioner {
    fn name(&self) -> &str {
        "stub"
    }

    fn init_and_apply(&self, config: &ScenarioConfig) -> Result<(), ProbeError> {
        self.applies.fetch_add(1, Ordering::SeqCst);
        match &self.apply_error {
            Some(reason) => Err(ProvisionError::Apply {
                dir: config.terraform_dir().display().to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn output(&self, _config: &ScenarioConfig, name: &str) -> Result<String, ProbeError> {
        self.output_reads.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_output {
            panic!("stub provisioner panicked reading '{name}'");
        }
        self.outputs.get(name).cloned().ok_or_else(|| {
            ProvisionError::Output {
                name: name.to_owned(),
                reason: "output not declared".to_owned(),
            }
            .into()
        })
    }

    fn destroy(&self, config: &ScenarioConfig) -> Result<(), ProbeError> {
        self.destroys.fetch_add(1, Ordering::SeqCst);
        match &self.destroy_error {
            Some(reason) => Err(ProvisionError::Destroy {
                dir: config.terraform_dir().display().to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
