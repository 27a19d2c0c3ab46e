// Domain Layer - Pure probe entities

pub mod command;
pub mod error;
pub mod probe_result;

// Re-exports
pub use command::ProbeCommand;
pub use error::DomainError;
pub use probe_result::{ProbeResult, ProbeResultBuilder, ProbeStatus};
