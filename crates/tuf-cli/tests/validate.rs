use std::fs;

mod common;

use common::{parse_json, seed_workspaces, tuf_cmd};

fn init(dir: &std::path::Path) {
    tuf_cmd(dir)
        .args(["init", "-w", "network,compute"])
        .assert()
        .success();
}

#[test]
fn validate_passes_for_untouched_workspaces() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_workspaces(temp.path());
    init(temp.path());

    let assert = tuf_cmd(temp.path())
        .args(["--json", "validate"])
        .assert()
        .success();
    assert_eq!(parse_json(&assert)["status"], "ok");
}

#[test]
fn validate_reports_drift() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_workspaces(temp.path());
    init(temp.path());
    fs::write(temp.path().join("network").join("backend.tf"), "terraform {\n}\n")
        .expect("edit file");
    fs::write(temp.path().join("compute").join("extra.tf"), "locals {}\n").expect("add file");

    let assert = tuf_cmd(temp.path())
        .args(["--json", "validate"])
        .assert()
        .code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["code"], "TUF310");
    let failures = payload["details"]["failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 2);
    let problems = payload["details"]["problems"].as_array().expect("problems");
    assert!(problems
        .iter()
        .any(|p| p.as_str().is_some_and(|p| p.starts_with("backend.tf: digest changed"))));
    assert!(problems
        .iter()
        .any(|p| p.as_str().is_some_and(|p| p.contains("expected 1, found 2"))));
}

#[test]
fn validate_without_state_is_a_user_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = tuf_cmd(temp.path())
        .args(["--json", "validate"])
        .assert()
        .code(1);
    assert_eq!(parse_json(&assert)["details"]["reason"], "state_missing");
}

#[test]
fn validate_honours_state_env_var() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_workspaces(temp.path());
    tuf_cmd(temp.path())
        .env("TUF_STATE_FILE", "custom.state")
        .args(["init", "-w", "compute"])
        .assert()
        .success();
    assert!(temp.path().join("custom.state").exists());

    tuf_cmd(temp.path())
        .env("TUF_STATE_FILE", "custom.state")
        .args(["validate"])
        .assert()
        .success();
}
