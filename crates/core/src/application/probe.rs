// Build probe service
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::report::render_report;
use crate::config::ProbeConfig;
use crate::domain::{ProbeCommand, ProbeResult, ProbeResultBuilder, ProbeStatus};
use crate::error::{ProbeError, Result};
use crate::port::{
    ProbeFilesystem, ReportWriter, RunError, TimeProvider, ToolInvocation, ToolRunner, ToolStatus,
};

/// Build probe
///
/// Runs the compiler once and records what happened:
/// validate root -> prepare output dir -> open report -> invoke -> list -> write.
///
/// Only infrastructure problems are errors. A failing compile is returned
/// as an ordinary `ProbeResult` and written to the report.
pub struct BuildProbe {
    runner: Arc<dyn ToolRunner>,
    filesystem: Arc<dyn ProbeFilesystem>,
    time_provider: Arc<dyn TimeProvider>,
}

impl BuildProbe {
    /// Create a new build probe
    ///
    /// # Example
    /// ```ignore
    /// let probe = BuildProbe::new(
    ///     Arc::new(SubprocessToolRunner::new()),
    ///     Arc::new(LocalFilesystem),
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// ```
    pub fn new(
        runner: Arc<dyn ToolRunner>,
        filesystem: Arc<dyn ProbeFilesystem>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            runner,
            filesystem,
            time_provider,
        }
    }

    /// Probe with the default compiler (`npx tsc`)
    pub async fn run_probe(
        &self,
        project_root: impl Into<PathBuf>,
        tsconfig_path: &str,
        output_dir: &str,
        report_path: &str,
    ) -> Result<ProbeResult> {
        let config = ProbeConfig {
            tsconfig: tsconfig_path.to_string(),
            output_dir: output_dir.to_string(),
            report: report_path.to_string(),
            ..ProbeConfig::new(project_root)
        };
        self.run(&config).await
    }

    /// Run one probe for the given configuration
    ///
    /// # Errors
    /// - ProbeError::ProjectRootMissing if the root is not a directory
    /// - ProbeError::ReportUnwritable if the report cannot be opened or written
    /// - ProbeError::OutputDir if the output directory cannot be created
    /// - ProbeError::ToolNotFound if the compiler executable is missing
    pub async fn run(&self, config: &ProbeConfig) -> Result<ProbeResult> {
        let command = config.command()?;

        // 1. Preconditions (before the compiler is touched)
        if !self.filesystem.is_dir(&config.project_root) {
            return Err(ProbeError::ProjectRootMissing(config.project_root.clone()));
        }

        // 2. Prepare output directory (the report may live inside it)
        let output_path = config.output_dir_path();
        debug!(output_dir = %output_path.display(), "Ensuring output directory");
        self.filesystem
            .ensure_dir(&output_path)
            .map_err(|source| ProbeError::OutputDir {
                path: output_path.clone(),
                source,
            })?;

        let report_path = config.report_path();
        let writer = self
            .filesystem
            .open_report(&report_path)
            .map_err(|source| ProbeError::ReportUnwritable {
                path: report_path.clone(),
                source,
            })?;

        // 3. Invoke compiler
        let builder = match self
            .invoke(&command, &config.project_root, &config.output_dir)
            .await
        {
            Ok(builder) => builder,
            Err(e) => return Err(abandon_report(writer, &report_path, e)),
        };

        // 4. Inspect output
        let output_files = match self.list_output(&output_path) {
            Ok(files) => files,
            Err(e) => return Err(abandon_report(writer, &report_path, e)),
        };
        let result = builder.build(output_files);

        // 5. Persist report
        writer
            .write_report(&render_report(&result))
            .map_err(|source| ProbeError::ReportUnwritable {
                path: report_path.clone(),
                source,
            })?;

        info!(
            report = %report_path.display(),
            status = %result.status,
            return_code = ?result.return_code,
            artifacts = result.artifact_count(),
            "Probe report written"
        );

        Ok(result)
    }

    /// Run the compiler and fold its outcome into a result builder
    async fn invoke(
        &self,
        command: &ProbeCommand,
        working_dir: &Path,
        output_dir: &str,
    ) -> Result<ProbeResultBuilder> {
        let invocation = ToolInvocation {
            command: command.clone(),
            working_dir: working_dir.to_path_buf(),
        };
        let builder = ProbeResultBuilder::new(command, output_dir);

        info!(command = %command, working_dir = %working_dir.display(), "Invoking compiler");

        let start_time = self.time_provider.now_millis();
        let outcome = self.runner.run(&invocation).await;
        let duration_ms = self.time_provider.now_millis() - start_time;

        let builder = match outcome {
            Ok(output) => {
                let status = match output.status {
                    ToolStatus::Exited(0) => ProbeStatus::Success,
                    ToolStatus::Exited(_) => ProbeStatus::Failed,
                    ToolStatus::Signaled(_) => ProbeStatus::Terminated,
                };
                if !output.status.success() {
                    warn!(
                        command = %command,
                        return_code = output.status.return_code(),
                        "Compiler did not succeed (recorded in report)"
                    );
                }
                builder.completed(
                    status,
                    output.status.return_code(),
                    output.stdout,
                    output.stderr,
                )
            }
            Err(RunError::NotFound(program)) => {
                return Err(ProbeError::ToolNotFound(program));
            }
            Err(e) => {
                warn!(command = %command, error = %e, "Compiler launch failed (recorded in report)");
                builder.launch_failed(e.to_string())
            }
        };

        Ok(builder.duration_ms(duration_ms))
    }

    fn list_output(&self, output_path: &Path) -> Result<Option<Vec<String>>> {
        let entries = self
            .filesystem
            .list_entries(output_path)
            .map_err(|source| ProbeError::Listing {
                path: output_path.to_path_buf(),
                source,
            })?;

        if entries.is_none() {
            warn!(output_dir = %output_path.display(), "Output directory missing after compile");
        }

        Ok(entries)
    }
}

/// Drop a report the run will never fill, then hand back the abort reason
fn abandon_report(writer: Box<dyn ReportWriter>, report_path: &Path, cause: ProbeError) -> ProbeError {
    if let Err(e) = writer.discard() {
        warn!(report = %report_path.display(), error = %e, "Failed to discard unused report file");
    }
    cause
}
