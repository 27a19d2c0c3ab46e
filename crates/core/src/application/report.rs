// Report rendering
use crate::domain::ProbeResult;

/// Placeholder for a missing return code
pub const RETURN_CODE_UNAVAILABLE: &str = "unavailable";

/// Render a probe result as the plain-text report
///
/// Layout:
/// ```text
/// Command: npx tsc -p daemon/tsconfig.json
/// Return code: 0
///
/// STDOUT:
/// <stdout>
///
/// STDERR:
/// <stderr>
///
/// Files in build/daemon: ["server.js"]
/// ```
pub fn render_report(result: &ProbeResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("Command: {}\n", result.command_line()));

    match result.return_code {
        Some(code) => out.push_str(&format!("Return code: {}\n", code)),
        None => out.push_str(&format!("Return code: {}\n", RETURN_CODE_UNAVAILABLE)),
    }
    if let Some(reason) = &result.launch_error {
        out.push_str(&format!("Launch error: {}\n", reason));
    }

    out.push_str(&format!("\nSTDOUT:\n{}\n", result.stdout));
    out.push_str(&format!("\nSTDERR:\n{}\n", result.stderr));

    match &result.output_files {
        Some(files) => out.push_str(&format!("\nFiles in {}: {:?}\n", result.output_dir, files)),
        None => out.push_str(&format!("\n{} does not exist\n", result.output_dir)),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProbeCommand, ProbeResultBuilder, ProbeStatus};

    fn command() -> ProbeCommand {
        ProbeCommand::compile(
            &["npx".to_string(), "tsc".to_string()],
            "daemon/tsconfig.json",
        )
        .unwrap()
    }

    #[test]
    fn test_render_success_with_files() {
        let result = ProbeResultBuilder::new(&command(), "build/daemon")
            .completed(ProbeStatus::Success, 0, String::new(), String::new())
            .build(Some(vec!["history.js".into(), "server.js".into()]));

        let expected = "Command: npx tsc -p daemon/tsconfig.json\n\
                        Return code: 0\n\
                        \n\
                        STDOUT:\n\
                        \n\
                        \n\
                        STDERR:\n\
                        \n\
                        \n\
                        Files in build/daemon: [\"history.js\", \"server.js\"]\n";

        assert_eq!(render_report(&result), expected);
    }

    #[test]
    fn test_render_missing_dir() {
        let result = ProbeResultBuilder::new(&command(), "build/daemon")
            .completed(
                ProbeStatus::Failed,
                2,
                "daemon/server.ts(3,1): error TS2304\n".into(),
                String::new(),
            )
            .build(None);

        let report = render_report(&result);

        assert!(report.contains("Return code: 2\n"));
        assert!(report.contains("\nSTDOUT:\ndaemon/server.ts(3,1): error TS2304\n"));
        assert!(report.ends_with("\nbuild/daemon does not exist\n"));
        assert!(!report.contains("Files in"));
    }

    #[test]
    fn test_render_launch_failure() {
        let result = ProbeResultBuilder::new(&command(), "build/daemon")
            .launch_failed("Spawn failed: permission denied")
            .build(Some(vec![]));

        let report = render_report(&result);

        assert!(report.contains("Return code: unavailable\n"));
        assert!(report.contains("Launch error: Spawn failed: permission denied\n"));
        assert!(report.contains("Files in build/daemon: []\n"));
    }
}
