// Probe Result Domain Model

use super::command::ProbeCommand;

/// Outcome of the compiler run as observed by the probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Compiler exited 0
    Success,
    /// Compiler exited nonzero
    Failed,
    /// Compiler was terminated by a signal
    Terminated,
    /// Compiler was located but could not be run to completion
    LaunchFailed,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Success => write!(f, "SUCCESS"),
            ProbeStatus::Failed => write!(f, "FAILED"),
            ProbeStatus::Terminated => write!(f, "TERMINATED"),
            ProbeStatus::LaunchFailed => write!(f, "LAUNCH_FAILED"),
        }
    }
}

/// Result of one probe invocation
///
/// Created once, never mutated, rendered into the report and dropped.
/// `return_code` is `Some` iff the compiler ran to completion (any exit code,
/// or the negated signal number when it was killed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub command: Vec<String>,
    pub return_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,

    /// Output directory as configured (report label)
    pub output_dir: String,
    /// Immediate entries of `output_dir`, sorted; `None` when it does not exist
    pub output_files: Option<Vec<String>>,

    pub status: ProbeStatus,
    pub duration_ms: i64,
    pub launch_error: Option<String>,
}

impl ProbeResult {
    /// Literal command string as it appears in the report
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }

    pub fn artifact_count(&self) -> usize {
        self.output_files.as_ref().map_or(0, Vec::len)
    }
}

/// Builder used by the probe service to assemble a result step by step
#[derive(Debug)]
pub struct ProbeResultBuilder {
    command: Vec<String>,
    output_dir: String,
    return_code: Option<i32>,
    stdout: String,
    stderr: String,
    status: ProbeStatus,
    duration_ms: i64,
    launch_error: Option<String>,
}

impl ProbeResultBuilder {
    pub fn new(command: &ProbeCommand, output_dir: impl Into<String>) -> Self {
        Self {
            command: command.to_vec(),
            output_dir: output_dir.into(),
            return_code: None,
            stdout: String::new(),
            stderr: String::new(),
            status: ProbeStatus::LaunchFailed,
            duration_ms: 0,
            launch_error: None,
        }
    }

    /// Record a completed compiler run
    pub fn completed(
        mut self,
        status: ProbeStatus,
        return_code: i32,
        stdout: String,
        stderr: String,
    ) -> Self {
        self.status = status;
        self.return_code = Some(return_code);
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    /// Record a run that never completed
    pub fn launch_failed(mut self, reason: impl Into<String>) -> Self {
        self.status = ProbeStatus::LaunchFailed;
        self.return_code = None;
        self.launch_error = Some(reason.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn build(self, output_files: Option<Vec<String>>) -> ProbeResult {
        ProbeResult {
            command: self.command,
            return_code: self.return_code,
            stdout: self.stdout,
            stderr: self.stderr,
            output_dir: self.output_dir,
            output_files,
            status: self.status,
            duration_ms: self.duration_ms,
            launch_error: self.launch_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> ProbeCommand {
        ProbeCommand::compile(&["tsc".to_string()], "tsconfig.json").unwrap()
    }

    #[test]
    fn test_completed_result_has_return_code() {
        let result = ProbeResultBuilder::new(&command(), "build/daemon")
            .completed(ProbeStatus::Failed, 2, String::new(), "error TS2304".into())
            .duration_ms(42)
            .build(Some(vec!["server.js".to_string()]));

        assert_eq!(result.return_code, Some(2));
        assert_eq!(result.status, ProbeStatus::Failed);
        assert_eq!(result.command_line(), "tsc -p tsconfig.json");
        assert_eq!(result.artifact_count(), 1);
        assert!(!result.is_success());
    }

    #[test]
    fn test_launch_failed_has_no_return_code() {
        let result = ProbeResultBuilder::new(&command(), "build/daemon")
            .launch_failed("permission denied")
            .build(None);

        assert_eq!(result.return_code, None);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "");
        assert_eq!(result.launch_error.as_deref(), Some("permission denied"));
        assert_eq!(result.artifact_count(), 0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProbeStatus::Success.to_string(), "SUCCESS");
        assert_eq!(ProbeStatus::LaunchFailed.to_string(), "LAUNCH_FAILED");
    }
}
