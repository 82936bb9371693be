#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::assert::Assert;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;

/// `tuf` running in `dir` with plain logging and no inherited state override.
pub fn tuf_cmd(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("tuf");
    cmd.current_dir(dir)
        .env("TUF_LOG_MODE", "CI")
        .env("NO_COLOR", "1")
        .env_remove("TUF_STATE_FILE")
        .env_remove("TUF_UNSORTED_SCAN")
        .env_remove("RUST_LOG");
    cmd
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write file");
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}

pub const EKS_ROLE: &str = "resource \"aws_iam_role\" \"eks_auto\" {\n  name = \"eks\"\n}";
pub const OTHER_ROLE: &str = "resource \"aws_iam_role\" \"other\" {\n  name = \"other\"\n}";
pub const VPC_MODULE: &str = "module \"vpc\" {\n  source = \"./vpc\"\n}";

/// Two workspaces with a couple of Terraform files each.
pub fn seed_workspaces(root: &Path) {
    write_file(
        &root.join("network").join("main.tf"),
        &format!("{VPC_MODULE}\n\n{OTHER_ROLE}\n"),
    );
    write_file(&root.join("network").join("backend.tf"), "terraform {}\n");
    write_file(&root.join("compute").join("main.tf"), &format!("{EKS_ROLE}\n"));
}
