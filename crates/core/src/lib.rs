// Build Probe Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal layout)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use application::BuildProbe;
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
