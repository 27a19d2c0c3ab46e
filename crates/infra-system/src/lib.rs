// Build Probe Infrastructure - System Adapters
// Implements: ToolRunner, ProbeFilesystem

pub mod local_filesystem;
pub mod subprocess_runner;

pub use local_filesystem::LocalFilesystem;
pub use subprocess_runner::SubprocessToolRunner;
