//! Console summary printed after the report is written

use colored::Colorize;
use tabled::{Table, Tabled};

use buildprobe_core::application::report::RETURN_CODE_UNAVAILABLE;
use buildprobe_core::domain::{ProbeResult, ProbeStatus};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn rows(result: &ProbeResult) -> Vec<SummaryRow> {
    let return_code = result
        .return_code
        .map_or_else(|| RETURN_CODE_UNAVAILABLE.to_string(), |code| code.to_string());

    let artifacts = match &result.output_files {
        Some(files) => format!("{} in {}", files.len(), result.output_dir),
        None => format!("{} does not exist", result.output_dir),
    };

    vec![
        SummaryRow {
            field: "Command",
            value: result.command_line(),
        },
        SummaryRow {
            field: "Return code",
            value: return_code,
        },
        SummaryRow {
            field: "Status",
            value: result.status.to_string(),
        },
        SummaryRow {
            field: "Artifacts",
            value: artifacts,
        },
        SummaryRow {
            field: "Duration",
            value: format!("{} ms", result.duration_ms),
        },
    ]
}

/// Render the summary table
pub fn render(result: &ProbeResult) -> String {
    Table::new(rows(result)).to_string()
}

pub fn print(result: &ProbeResult, report: &str) {
    let headline = if result.is_success() {
        "✓ Compiler succeeded".green().bold()
    } else if result.status == ProbeStatus::LaunchFailed {
        "✗ Compiler could not run".yellow().bold()
    } else {
        "✗ Compiler failed".red().bold()
    };

    println!("{}", headline);
    println!();
    println!("{}", render(result));
    println!();
    println!("Done. Check {}", report.cyan());
}
