//! Probe edge cases: precondition failures, missing tools, vanished output

use std::fs;
use std::sync::Arc;

use buildprobe_core::domain::ProbeStatus;
use buildprobe_core::port::time_provider::SystemTimeProvider;
use buildprobe_core::{BuildProbe, ProbeConfig, ProbeError};
use buildprobe_infra_system::{LocalFilesystem, SubprocessToolRunner};
use tempfile::TempDir;

fn build_probe() -> BuildProbe {
    BuildProbe::new(
        Arc::new(SubprocessToolRunner::new()),
        Arc::new(LocalFilesystem),
        Arc::new(SystemTimeProvider),
    )
}

fn shell(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn test_missing_project_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("gone");
    let config = ProbeConfig::new(&root);

    let result = build_probe().run(&config).await;

    assert!(matches!(result, Err(ProbeError::ProjectRootMissing(_))));
    assert!(!root.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unwritable_report_aborts_before_compiler() {
    let temp = TempDir::new().unwrap();
    let config = ProbeConfig {
        report: "no/such/dir/build-result.txt".to_string(),
        compiler: shell("touch compiler-ran"),
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await;

    assert!(matches!(result, Err(ProbeError::ReportUnwritable { .. })));
    assert!(!temp.path().join("compiler-ran").exists());
}

#[tokio::test]
async fn test_tool_not_found() {
    let temp = TempDir::new().unwrap();
    let config = ProbeConfig {
        compiler: vec!["buildprobe-no-such-compiler".to_string()],
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await;

    match result {
        Err(ProbeError::ToolNotFound(program)) => {
            assert_eq!(program, "buildprobe-no-such-compiler")
        }
        other => panic!("expected ToolNotFound, got {:?}", other),
    }
    assert!(!temp.path().join("build-result.txt").exists());
}

#[tokio::test]
async fn test_tool_not_found_keeps_previous_report() {
    let temp = TempDir::new().unwrap();
    let report_path = temp.path().join("build-result.txt");
    fs::write(&report_path, "Return code: 0\n").unwrap();
    let config = ProbeConfig {
        compiler: vec!["buildprobe-no-such-compiler".to_string()],
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await;

    assert!(matches!(result, Err(ProbeError::ToolNotFound(_))));
    assert_eq!(fs::read_to_string(&report_path).unwrap(), "Return code: 0\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_report_inside_fresh_output_dir() {
    let temp = TempDir::new().unwrap();
    let config = ProbeConfig {
        report: "build/daemon/result.txt".to_string(),
        compiler: shell("true"),
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await.unwrap();

    assert_eq!(result.return_code, Some(0));
    let report = fs::read_to_string(temp.path().join("build/daemon/result.txt")).unwrap();
    assert!(report.contains("Return code: 0\n"));
    assert!(report.ends_with("\nFiles in build/daemon: [\"result.txt\"]\n"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_output_dir_removed_by_compiler() {
    let temp = TempDir::new().unwrap();
    let config = ProbeConfig {
        compiler: shell("rm -rf build/daemon"),
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await.unwrap();

    assert_eq!(result.return_code, Some(0));
    assert_eq!(result.output_files, None);

    let report = fs::read_to_string(temp.path().join("build-result.txt")).unwrap();
    assert!(report.ends_with("\nbuild/daemon does not exist\n"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_killed_compiler_is_recorded() {
    let temp = TempDir::new().unwrap();
    let config = ProbeConfig {
        compiler: shell("kill -9 $$"),
        ..ProbeConfig::new(temp.path())
    };

    let result = build_probe().run(&config).await.unwrap();

    assert_eq!(result.status, ProbeStatus::Terminated);
    assert_eq!(result.return_code, Some(-9));

    let report = fs::read_to_string(temp.path().join("build-result.txt")).unwrap();
    assert!(report.contains("Return code: -9\n"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_previous_report_replaced() {
    let temp = TempDir::new().unwrap();
    let report_path = temp.path().join("build-result.txt");
    fs::write(&report_path, "stale report from an earlier run ".repeat(20)).unwrap();
    let config = ProbeConfig {
        compiler: shell("echo fresh"),
        ..ProbeConfig::new(temp.path())
    };

    build_probe().run(&config).await.unwrap();

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with("Command: sh -c echo fresh -p daemon/tsconfig.json\n"));
    assert!(!report.contains("stale"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_absolute_output_dir_and_report() {
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let out = elsewhere.path().join("artifacts");
    let report = elsewhere.path().join("result.txt");
    let config = ProbeConfig {
        output_dir: out.to_string_lossy().into_owned(),
        report: report.to_string_lossy().into_owned(),
        compiler: shell("true"),
        ..ProbeConfig::new(project.path())
    };

    build_probe().run(&config).await.unwrap();

    assert!(out.is_dir());
    let contents = fs::read_to_string(&report).unwrap();
    assert!(contents.ends_with(&format!("\nFiles in {}: []\n", out.display())));
}
