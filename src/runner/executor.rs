//! Child process execution

use std::process::Command;

use super::Invocation;
use crate::errors::{RunnerError, RunnerResult};

/// Captured result of one finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Exit status was zero
    pub success: bool,
    /// Stdout followed by stderr
    pub output: String,
}

/// Execute an [`Invocation`] to completion and capture its output.
///
/// `Err` means the process could not be started at all.
pub trait UnitExecutor {
    fn execute(&self, invocation: &Invocation) -> RunnerResult<Execution>;
}

/// Spawns a real child process and blocks until it exits.
pub struct ProcessExecutor;

impl UnitExecutor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> RunnerResult<Execution> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|source| RunnerError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !combined.is_empty() && !stderr.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);

        tracing::debug!("`{}` exited with {}", invocation, output.status);
        Ok(Execution {
            success: output.status.success(),
            output: combined,
        })
    }
}
