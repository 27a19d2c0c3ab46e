// Tool Runner Port
// Abstraction for invoking the external compiler

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ProbeCommand;

/// What to run and where
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub command: ProbeCommand,
    pub working_dir: PathBuf,
}

/// Captured output of a tool run that completed
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ToolStatus,
    pub stdout: String,
    pub stderr: String,
}

/// How the tool exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Normal exit with the given code
    Exited(i32),
    /// Killed by the given signal (Unix only)
    Signaled(i32),
}

impl ToolStatus {
    /// Integer reported as the return code (signals are negated)
    pub fn return_code(&self) -> i32 {
        match self {
            ToolStatus::Exited(code) => *code,
            ToolStatus::Signaled(signal) => -signal,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ToolStatus::Exited(0))
    }
}

/// Run errors
#[derive(Error, Debug)]
pub enum RunError {
    /// Executable could not be located on the search path
    #[error("Executable not found: {0}")]
    NotFound(String),

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Tool Runner trait
///
/// Implementations:
/// - SubprocessToolRunner: spawns the compiler as a child process
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the tool to completion and capture its output as text
    ///
    /// A nonzero exit is `Ok`; only failures to run at all are `Err`.
    ///
    /// # Errors
    /// - RunError::NotFound if the executable cannot be located
    /// - RunError::SpawnFailed if the process cannot be started
    /// - RunError::IoError if waiting on the process fails
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RunError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with code and output
        Exit {
            code: i32,
            stdout: String,
            stderr: String,
        },
        /// Killed by signal
        Signal(i32),
        /// Executable missing
        NotFound,
        /// Spawn fails with message
        SpawnFail(String),
    }

    /// Mock Tool Runner for testing
    pub struct MockToolRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        invocations: Arc<Mutex<Vec<ToolInvocation>>>,
    }

    impl MockToolRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                invocations: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Exit {
                code: 0,
                stdout: stdout.into(),
                stderr: String::new(),
            })
        }

        pub fn new_exit(code: i32, stderr: impl Into<String>) -> Self {
            Self::new(MockBehavior::Exit {
                code,
                stdout: String::new(),
                stderr: stderr.into(),
            })
        }

        pub fn call_count(&self) -> usize {
            self.invocations.lock().unwrap().len()
        }

        pub fn last_invocation(&self) -> Option<ToolInvocation> {
            self.invocations.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ToolRunner for MockToolRunner {
        async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RunError> {
            self.invocations.lock().unwrap().push(invocation.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Exit {
                    code,
                    stdout,
                    stderr,
                } => Ok(ToolOutput {
                    status: ToolStatus::Exited(code),
                    stdout,
                    stderr,
                }),
                MockBehavior::Signal(signal) => Ok(ToolOutput {
                    status: ToolStatus::Signaled(signal),
                    stdout: String::new(),
                    stderr: String::new(),
                }),
                MockBehavior::NotFound => Err(RunError::NotFound(
                    invocation.command.program().to_string(),
                )),
                MockBehavior::SpawnFail(msg) => Err(RunError::SpawnFailed(msg)),
            }
        }
    }
}
