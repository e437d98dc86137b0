// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

#[test]
fn help_lists_warmup_flags() {
    cargo_bin_cmd!("jfs-warmup")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--threads"))
        .stdout(predicate::str::contains("--background"))
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn no_paths_is_a_noop() {
    cargo_bin_cmd!("jfs-warmup")
        .env_remove("JFS_WARMUP_FILE")
        .assert()
        .success();
}

#[test]
fn json_report_for_empty_run() {
    let output = cargo_bin_cmd!("jfs-warmup")
        .env_remove("JFS_WARMUP_FILE")
        .arg("--json")
        .output()
        .expect("run jfs-warmup");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(report["batches"], 0);
    assert_eq!(report["warmed"], 0);
    assert!(report["mount_root"].is_null());
}

#[test]
fn missing_path_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("jfs-warmup")
        .arg("--file")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn blank_path_list_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("list.txt");
    fs::write(&list, "\n   \n").unwrap();

    cargo_bin_cmd!("jfs-warmup").arg("-f").arg(&list).assert().success();
}

#[test]
fn path_outside_juicefs_fails() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("data");
    fs::create_dir(&target).unwrap();

    cargo_bin_cmd!("jfs-warmup")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("warm up aborted"));
}

#[test]
fn zero_threads_is_rejected() {
    cargo_bin_cmd!("jfs-warmup")
        .args(["-p", "0", "/tmp"])
        .assert()
        .failure();
}

#[test]
fn debug_level_logs_run_parameters_to_stderr() {
    cargo_bin_cmd!("jfs-warmup")
        .env_remove("RUST_LOG")
        .env_remove("JFS_WARMUP_FILE")
        .args(["--log-level", "debug", "--log-format", "json", "--json", "-p", "7"])
        .assert()
        .success()
        .stderr(predicate::str::contains("starting warm up"))
        .stderr(predicate::str::contains("\"threads\":7"))
        .stdout(predicate::str::contains("starting warm up").not());
}
