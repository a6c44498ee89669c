// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument handling of the binaries.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;

#[test]
fn agent_without_command_exits_one() {
    Command::cargo_bin("jg-exec").unwrap().args(["-j", "backup"]).assert().code(1);
}

#[test]
fn agent_without_job_exits_one() {
    Command::cargo_bin("jg-exec").unwrap().args(["--", "true"]).assert().code(1);
}

#[test]
fn agent_with_unreachable_coordinator_exits_one() {
    Command::cargo_bin("jg-exec")
        .unwrap()
        .args(["-j", "backup", "-s", "http://127.0.0.1:1", "--", "true"])
        .assert()
        .code(1);
}

#[test]
fn agent_help_exits_zero() {
    Command::cargo_bin("jg-exec").unwrap().arg("--help").assert().success();
}

#[test]
fn ctl_rejects_unknown_format() {
    Command::cargo_bin("jg").unwrap().args(["--format", "yaml", "job", "list"]).assert().failure();
}
