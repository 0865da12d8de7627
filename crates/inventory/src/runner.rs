//! Process execution through `std::process::Command`.

use std::process::Command;

use tracing::debug;

use tfprobe_core::error::{CommandError, ProbeError};
use tfprobe_core::pipeline::CommandRunner;
use tfprobe_core::types::{CommandOutput, CommandSpec};

/// Production [`CommandRunner`] that spawns real processes.
///
/// Blocks until the child exits. Both streams are captured and decoded
/// lossily as UTF-8. No timeout is imposed; whatever the invoked tool
/// enforces internally applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError> {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.arg_list());
        if let Some(dir) = spec.working_dir() {
            cmd.current_dir(dir);
        }

        debug!(command = %spec, dir = ?spec.working_dir(), "spawning command");

        let output = cmd.output().map_err(|e| CommandError::Spawn {
            command: spec.to_string(),
            reason: e.to_string(),
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        debug!(
            command = %spec,
            exit_code = ?result.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "command finished"
        );

        Ok(result)
    }
}
