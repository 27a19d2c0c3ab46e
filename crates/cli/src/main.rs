//! Build Probe CLI - runs the TypeScript compiler once and records the outcome
//!
//! Exit code reflects whether the report was written, not whether the
//! compile succeeded.

mod logging;
mod settings;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

use buildprobe_core::application::render_report;
use buildprobe_core::port::time_provider::SystemTimeProvider;
use buildprobe_core::{BuildProbe, VERSION};
use buildprobe_infra_system::{LocalFilesystem, SubprocessToolRunner};

use logging::LogFormat;
use settings::ConfigOverrides;

#[derive(Parser)]
#[command(name = "build-probe")]
#[command(about = "Compile the daemon project and record the compiler's output", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Echo the report to stdout after writing it
    #[arg(long)]
    print: bool,

    /// Diagnostic log format (stderr)
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_format)?;
    info!("Build Probe v{} starting...", VERSION);

    run(&cli, &mut std::io::stdout()).await
}

/// Load configuration, run the compiler once and report
///
/// With `--print` the rendered report is echoed to `out`.
async fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    // 1. Load configuration
    let config = settings::load(&cli.overrides)?;
    info!(
        project_root = %config.project_root.display(),
        tsconfig = %config.tsconfig,
        output_dir = %config.output_dir,
        report = %config.report,
        "Configuration loaded"
    );

    // 2. Setup dependencies (DI wiring)
    let probe = BuildProbe::new(
        Arc::new(SubprocessToolRunner::new()),
        Arc::new(LocalFilesystem),
        Arc::new(SystemTimeProvider),
    );

    // 3. Run
    let result = probe
        .run(&config)
        .await
        .with_context(|| format!("Probe failed in {}", config.project_root.display()))?;

    if cli.print {
        write!(out, "{}", render_report(&result)).context("Failed to print report")?;
        out.flush()?;
    }
    summary::print(&result, &config.report);

    Ok(())
}
