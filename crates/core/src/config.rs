// Probe Configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, ProbeCommand};

pub const DEFAULT_PROJECT_ROOT: &str = ".";
pub const DEFAULT_TSCONFIG: &str = "daemon/tsconfig.json";
pub const DEFAULT_OUTPUT_DIR: &str = "build/daemon";
pub const DEFAULT_REPORT: &str = "build-result.txt";
pub const DEFAULT_COMPILER: &[&str] = &["npx", "tsc"];

/// Probe configuration
///
/// `tsconfig`, `output_dir` and `report` are resolved against `project_root`
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub project_root: PathBuf,
    pub tsconfig: String,
    pub output_dir: String,
    pub report: String,
    pub compiler: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from(DEFAULT_PROJECT_ROOT),
            tsconfig: DEFAULT_TSCONFIG.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            report: DEFAULT_REPORT.to_string(),
            compiler: DEFAULT_COMPILER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProbeConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Compiler invocation for this configuration
    pub fn command(&self) -> Result<ProbeCommand, DomainError> {
        if self.tsconfig.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "tsconfig path must not be empty".to_string(),
            ));
        }
        ProbeCommand::compile(&self.compiler, &self.tsconfig).ok_or(DomainError::EmptyCompiler)
    }

    pub fn output_dir_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.report)
    }

    /// Join a relative path onto the project root (absolute paths pass through)
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(relative)
    }
}
