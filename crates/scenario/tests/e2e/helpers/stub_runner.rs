//! Stub command runners for E2E tests.
//!
//! - [`StubRunner`] answers every command with one scripted output.
//! - [`FakeCloud`] answers both terraform and gcloud commands, so the real
//!   `TerraformProvisioner` can be exercised without any binaries.

use std::sync::Mutex;

use tfprobe_core::error::{CommandError, ProbeError};
use tfprobe_core::pipeline::CommandRunner;
use tfprobe_core::types::{CommandOutput, CommandSpec};

/// Returns a fixed response and records each command line.
pub struct StubRunner {
    response: Result<CommandOutput, String>,
    calls: Mutex<Vec<CommandSpec>>,
}

#[allow(dead_code)]
impl StubRunner {
    /// Exit 0 with the given stdout.
    pub fn succeeding(stdout: &str) -> Self {
        Self::replying(CommandOutput::success(stdout))
    }

    /// Exit with `code`, writing `stderr`.
    pub fn exiting(code: i32, stderr: &str) -> Self {
        Self::replying(CommandOutput::failure(code, stderr))
    }

    pub fn replying(output: CommandOutput) -> Self {
        Self {
            response: Ok(output),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail to start the process at all.
    pub fn unspawnable(reason: &str) -> Self {
        Self {
            response: Err(reason.to_owned()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded commands.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded commands rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError> {
        self.calls.lock().unwrap().push(spec.clone());
        match &self.response {
            Ok(output) => Ok(output.clone()),
            Err(reason) => Err(CommandError::Spawn {
                command: spec.to_string(),
                reason: reason.clone(),
            }
            .into()),
        }
    }
}

/// Simulates terraform and gcloud in one runner.
///
/// Terraform outputs are served as JSON strings; gcloud returns `listing`.
pub struct FakeCloud {
    outputs: Vec<(String, String)>,
    listing: CommandOutput,
    calls: Mutex<Vec<CommandSpec>>,
}

#[allow(dead_code)]
impl FakeCloud {
    pub fn new(listing: CommandOutput) -> Self {
        Self {
            outputs: Vec::new(),
            listing,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_output(mut self, name: &str, value: &str) -> Self {
        self.outputs.push((name.to_owned(), value.to_owned()));
        self
    }

    /// First argument of every recorded command, prefixed by the program.
    pub fn verbs(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|spec| {
                let verb = spec.arg_list().first().map(String::as_str).unwrap_or("");
                format!("{} {verb}", spec.program())
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCloud {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError> {
        self.calls.lock().unwrap().push(spec.clone());

        if spec.program() != "terraform" {
            return Ok(self.listing.clone());
        }

        let args = spec.arg_list();
        match args.first().map(String::as_str) {
            Some("output") => {
                let name = args.last().map(String::as_str).unwrap_or("");
                match self.outputs.iter().find(|(n, _)| n == name) {
                    Some((_, value)) => Ok(CommandOutput::success(format!("{value:?}\n"))),
                    None => Ok(CommandOutput::failure(
                        1,
                        format!("Error: Output \"{name}\" not found"),
                    )),
                }
            }
            _ => Ok(CommandOutput::success("")),
        }
    }
}
