//! Configuration layering: defaults < config file < command-line flags

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use buildprobe_core::ProbeConfig;

/// Flags that override `ProbeConfig` fields
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Config file (TOML, JSON or YAML) with ProbeConfig fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory the compiler runs in [default: .]
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<String>,

    /// Compiler configuration file, relative to the project root [default: daemon/tsconfig.json]
    #[arg(long, value_name = "PATH")]
    pub tsconfig: Option<String>,

    /// Directory expected to hold build artifacts [default: build/daemon]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Report file to write [default: build-result.txt]
    #[arg(long, value_name = "FILE")]
    pub report: Option<String>,

    /// Compiler program and leading arguments, one per flag [default: npx tsc]
    #[arg(long = "compiler", value_name = "PART", allow_hyphen_values = true)]
    pub compiler: Vec<String>,
}

/// Build the effective configuration
pub fn load(overrides: &ConfigOverrides) -> Result<ProbeConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = &overrides.config {
        debug!(path = %path.display(), "Loading config file");
        builder = builder.add_source(config::File::from(path.as_path()));
    }

    let mut probe_config: ProbeConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .context("Invalid configuration")?;

    if let Some(root) = &overrides.project_root {
        probe_config.project_root = PathBuf::from(root);
    }
    if let Some(tsconfig) = &overrides.tsconfig {
        probe_config.tsconfig = tsconfig.clone();
    }
    if let Some(output_dir) = &overrides.output_dir {
        probe_config.output_dir = output_dir.clone();
    }
    if let Some(report) = &overrides.report {
        probe_config.report = report.clone();
    }
    if !overrides.compiler.is_empty() {
        probe_config.compiler = overrides.compiler.clone();
    }

    // ~ in the project root (file or flag)
    let root = probe_config.project_root.to_string_lossy().into_owned();
    probe_config.project_root = PathBuf::from(shellexpand::tilde(&root).into_owned());

    Ok(probe_config)
}
