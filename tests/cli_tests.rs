#![cfg(unix)]

mod common;

use std::process::Command;

use common::*;

fn cli_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_boot-harness"))
}

#[test]
fn test_cli_help() {
    let output = cli_command().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Run emulator boot tests"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("list"));
}

#[test]
fn test_cli_version() {
    let output = cli_command().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("boot-harness"));
}

#[test]
fn test_cli_list_targets() {
    let output = cli_command().arg("list").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("arm"));
    assert!(stdout.contains("riscv64"));
    assert!(stdout.contains("do-qemux86"));
}

#[test]
fn test_cli_rejects_bad_root() {
    let output = cli_command()
        .args(["run", "--root", "/nonexistent/project"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not look like a project root"));
}

#[test]
fn test_cli_passing_target_exits_zero() {
    let root = create_root();
    write_script(root.path(), "do-qemuarm", passing_script());

    let output = cli_command()
        .args(["run", "-t", "arm", "--root"])
        .arg(root.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Test success detected for arm"));
    assert!(stdout.contains("Total: 1/1 architectures passed"));
}

#[test]
fn test_cli_failing_target_exits_one() {
    let root = create_root();
    write_script(root.path(), "do-qemuarm", failing_script());

    let output = cli_command()
        .args(["run", "-t", "arm", "--root"])
        .arg(root.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Test failure detected for arm"));
    assert!(stdout.contains("Some architectures failed!"));
}

#[test]
fn test_cli_unknown_target_only_exits_one() {
    let root = create_root();

    let output = cli_command()
        .args(["run", "-t", "nope", "--root"])
        .arg(root.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unknown architecture: nope"));
    assert!(stdout.contains("Total: 0/0 architectures passed"));
}

#[test]
fn test_cli_quiet_suppresses_echo_but_not_summary() {
    let root = create_root();
    write_script(root.path(), "do-qemuarm", passing_script());

    let output = cli_command()
        .args(["run", "-t", "arm", "-q", "--root"])
        .arg(root.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("[arm] booting kernel"));
    assert!(stdout.contains("TEST SUMMARY"));
}

#[test]
fn test_cli_log_dir_writes_artifacts() {
    let root = create_root();
    write_script(root.path(), "do-qemuarm", passing_script());
    let log_dir = root.path().join("ci-logs");

    let output = cli_command()
        .args(["run", "-t", "arm", "--root"])
        .arg(root.path())
        .arg("--log-dir")
        .arg(&log_dir)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(log_dir.join("arm.log").exists());
    assert!(log_dir.join("summary.txt").exists());
    assert!(log_dir.join("summary.json").exists());
}
