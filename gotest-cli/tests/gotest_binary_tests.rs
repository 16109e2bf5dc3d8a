#![allow(non_snake_case)]

use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn gotest() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gotest"));
    for var in ["GOTEST_ROOT", "GOTEST_PROFILE", "GOTEST_HTML", "GOTEST_GO", "GOTEST_NO_OPEN"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn gotest_binary__help__then_usage_and_exit_zero() {
    let output = gotest().arg("-h").output().expect("run gotest -h");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--detail"));
    assert!(stdout.contains("--ignore"));
    assert!(stdout.contains("passed directly to 'go test'"));
}

#[test]
fn gotest_binary__empty_tree__then_no_packages_found() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("README.md"), "# nothing to test\n").expect("write readme");

    let output = gotest()
        .arg("--root")
        .arg(root.path())
        .arg("--go")
        .arg("no-such-go-binary")
        .output()
        .expect("run gotest");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No Go packages found\n");
}

#[test]
fn gotest_binary__only_ignored_packages__then_no_packages_found() {
    let root = tempdir().expect("tempdir");
    fs::create_dir_all(root.path().join("gen/api")).expect("mkdir");
    fs::write(root.path().join("gen/api/api.go"), "package api\n").expect("write go file");

    let output = gotest()
        .arg("--root")
        .arg(root.path())
        .args(["-i", "gen", "-v"])
        .output()
        .expect("run gotest");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No Go packages found"));
}

#[test]
fn gotest_binary__missing_go__then_error_exit() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("main.go"), "package main\n").expect("write go file");

    let output = gotest()
        .arg("--root")
        .arg(root.path())
        .arg("--go")
        .arg("no-such-go-binary")
        .output()
        .expect("run gotest");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Testing 1 package(s)..."));
    assert!(stderr.starts_with("Error: locating go toolchain: no-such-go-binary not found: "));
}

#[test]
fn gotest_binary__error_with_backtrace_env__then_single_line_chain() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("main.go"), "package main\n").expect("write go file");

    let output = gotest()
        .arg("--root")
        .arg(root.path())
        .arg("--go")
        .arg("no-such-go-binary")
        .env("RUST_BACKTRACE", "1")
        .output()
        .expect("run gotest");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(!stderr.contains("Caused by"));
    assert!(!stderr.contains("backtrace"));
}

#[test]
fn gotest_binary__root_from_environment__then_used_as_default() {
    let root = tempdir().expect("tempdir");
    fs::create_dir_all(root.path().join("svc")).expect("mkdir");
    fs::write(root.path().join("svc/svc.go"), "package svc\n").expect("write go file");

    let output = gotest()
        .env("GOTEST_ROOT", root.path())
        .env("GOTEST_GO", "no-such-go-from-env")
        .arg("-d")
        .output()
        .expect("run gotest");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Found 1 package(s) with Go files:"));
    assert!(stdout.contains("  - ./svc"));
    assert!(stderr.contains("no-such-go-from-env not found"));
}

#[test]
fn gotest_binary__unknown_format__then_usage_error() {
    let output = gotest()
        .args(["--format", "xml"])
        .output()
        .expect("run gotest");

    assert_eq!(output.status.code(), Some(2));
}
