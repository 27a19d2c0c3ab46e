// Application Layer - Use cases

pub mod probe;
pub mod report;

pub use probe::BuildProbe;
pub use report::render_report;
