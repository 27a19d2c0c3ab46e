// Central Error Type for the Probe

use std::path::PathBuf;
use thiserror::Error;

/// Probe-infrastructure errors
///
/// Only these interrupt a run. A failing compiler is data in the report,
/// never a `ProbeError`.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Project root is not a directory: {}", .0.display())]
    ProjectRootMissing(PathBuf),

    #[error("Cannot write report {}: {source}", path.display())]
    ReportUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list output directory {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),
}

/// Result type alias using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;
