// Port Layer - Interfaces for external dependencies

pub mod filesystem;
pub mod time_provider; // For deterministic testing
pub mod tool_runner;

// Re-exports
pub use filesystem::{ProbeFilesystem, ReportWriter};
pub use time_provider::TimeProvider;
pub use tool_runner::{RunError, ToolInvocation, ToolOutput, ToolRunner, ToolStatus};
