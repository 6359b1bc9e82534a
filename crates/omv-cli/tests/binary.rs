//! End-to-end tests of the `omv` binary: exit codes and stream separation
//! exactly as the CI runner observes them.

use std::path::Path;
use std::process::{Command, Output};

const VALID_PROJECT: &str = r#"
name: OWASP Incubator Code Project
level: 2
type: code
pitch: "A very brief, one-line description of your project"
audience:
  - breaker
leaders:
  - name: Leader 1 Name
    github: leader-1-github
  - name: Leader 2 Name
    github: leader-2-github
    slack: leader-2-slack
"#;

/// Run `omv` with a clean environment pointing at `workspace`.
fn omv(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_omv"))
        .args(args)
        .env("GITHUB_WORKSPACE", workspace)
        .env_remove("INPUT_FILE_PATH")
        .env_remove("OMV_SCHEMA_DIR")
        .env_remove("OMV_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn omv")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_workspace_exits_zero_with_clean_stderr() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("project.owasp.yaml"), VALID_PROJECT).unwrap();

    let output = omv(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "SUCCESS: Validation passed!\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn empty_workspace_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = omv(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("ERROR: OWASP metadata file not found."));
}

#[test]
fn multiple_files_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("project.owasp.yaml"), VALID_PROJECT).unwrap();
    std::fs::write(dir.path().join("chapter.owasp.yaml"), "").unwrap();

    let output = omv(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("multiple"));
}

#[test]
fn empty_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("committee.owasp.yaml"), "").unwrap();

    let output = omv(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("None is not of type 'object'"));
}

#[test]
fn workspace_flag_overrides_environment() {
    let dir = tempfile::tempdir().unwrap();
    let empty = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("project.owasp.yaml"), VALID_PROJECT).unwrap();

    let workspace = dir.path().to_str().unwrap();
    let output = omv(empty.path(), &["--workspace", workspace]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn input_file_path_selects_explicit_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("project.owasp.yaml");
    std::fs::write(&file, VALID_PROJECT).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_omv"))
        .env("INPUT_FILE_PATH", &file)
        .env("GITHUB_WORKSPACE", "/tmp/omv-test-unused-workspace")
        .env_remove("OMV_SCHEMA_DIR")
        .env_remove("OMV_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn omv");
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn invalid_log_format_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("project.owasp.yaml"), VALID_PROJECT).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_omv"))
        .env("GITHUB_WORKSPACE", dir.path())
        .env("OMV_LOG_FORMAT", "yaml")
        .env_remove("INPUT_FILE_PATH")
        .env_remove("OMV_SCHEMA_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn omv");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("yaml"), "stderr: {}", stderr(&output));
}

#[test]
fn stray_argument_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("project.owasp.yaml"), VALID_PROJECT).unwrap();

    let output = omv(dir.path(), &["extra-arg"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
}

#[test]
fn version_flag_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = omv(dir.path(), &["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("omv "), "stdout: {}", stdout(&output));
}
