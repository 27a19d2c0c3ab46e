// Subprocess tool runner
// reason: tokio::process for non-blocking child management on the probe runtime
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::info;

use buildprobe_core::port::tool_runner::{
    RunError, ToolInvocation, ToolOutput, ToolRunner, ToolStatus,
};

/// Subprocess tool runner
/// Spawns the compiler as a child of the probe, inheriting its environment
pub struct SubprocessToolRunner;

impl SubprocessToolRunner {
    /// Create a new subprocess runner
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessToolRunner::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(
        &self,
        invocation: &ToolInvocation,
    ) -> Result<std::process::Output, RunError> {
        let command = &invocation.command;

        let child = Command::new(command.program())
            .args(command.args())
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RunError::NotFound(command.program().to_string()),
                _ => RunError::SpawnFailed(e.to_string()),
            })?;

        child
            .wait_with_output()
            .await
            .map_err(|e| RunError::IoError(e.to_string()))
    }

    /// Build tool output from process output
    fn build_output(&self, output: std::process::Output) -> ToolOutput {
        ToolOutput {
            status: exit_status(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for SubprocessToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a process exit status to an exit code or terminating signal
fn exit_status(status: ExitStatus) -> ToolStatus {
    if let Some(code) = status.code() {
        return ToolStatus::Exited(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ToolStatus::Signaled(signal);
        }
    }

    // No code and no signal: treat as generic failure
    ToolStatus::Exited(1)
}

#[async_trait]
impl ToolRunner for SubprocessToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RunError> {
        info!(
            command = %invocation.command,
            working_dir = %invocation.working_dir.display(),
            "Starting subprocess execution"
        );

        let output = self.spawn_and_wait(invocation).await?;
        let result = self.build_output(output);

        info!(
            command = %invocation.command,
            status = ?result.status,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "Subprocess execution completed"
        );

        Ok(result)
    }
}
