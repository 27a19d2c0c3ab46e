//! Diagnostic logging setup (stderr, so stdout stays clean for --print)

use anyhow::Result;
use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Library crates (`buildprobe_*`) and the `build-probe` binary (`build_probe`)
const DEFAULT_FILTER: &str = "buildprobe=info,build_probe=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// JSON lines
    Json,
}

/// Install the global subscriber; `RUST_LOG` overrides the default filter
pub fn init(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
