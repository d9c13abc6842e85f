//! Integration tests for the `fleetwatch` CLI binary.
//!
//! These tests validate argument parsing, help output, error handling,
//! and the sample-data pipeline end to end — all without a live RMM API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `fleetwatch` binary with env isolation.
///
/// Clears all `FLEETWATCH_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's real
/// configuration.
fn fleetwatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("fleetwatch");
    cmd.env("HOME", "/tmp/fleetwatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fleetwatch-cli-test-nonexistent")
        .env_remove("FLEETWATCH_CONFIG")
        .env_remove("FLEETWATCH_STORE")
        .env_remove("FLEETWATCH_BASE_URL")
        .env_remove("FLEETWATCH_API_KEY")
        .env_remove("FLEETWATCH_API_SECRET")
        .env_remove("FLEETWATCH_SAMPLE_DATA")
        .env_remove("FLEETWATCH_OUTPUT")
        .env_remove("FLEETWATCH_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = fleetwatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_flag_lists_commands() {
    fleetwatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("sync")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn version_flag() {
    fleetwatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleetwatch"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn invalid_subcommand() {
    let output = fleetwatch_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn invalid_output_format() {
    let output = fleetwatch_cmd()
        .args(["--output", "sideways", "sites"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn sync_without_source_is_a_usage_error() {
    let output = fleetwatch_cmd().arg("sync").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "no base URL configured");
    let text = combined_output(&output);
    assert!(
        text.contains("base-url") || text.contains("source") || text.contains("config"),
        "Expected config guidance:\n{text}"
    );
}

#[test]
fn sync_with_url_but_no_credentials_is_an_auth_error() {
    let output = fleetwatch_cmd()
        .args(["--base-url", "https://rmm.example.net/api/v2", "sync"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("credentials") || text.contains("API"),
        "Expected credential guidance:\n{text}"
    );
}

#[test]
fn resolve_unknown_alert_is_not_found() {
    let output = fleetwatch_cmd()
        .args(["resolve", "ghost-alert"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── Sample-data pipeline ────────────────────────────────────────────

#[test]
fn sample_sync_then_query_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let store_arg = store.to_str().unwrap().to_owned();

    fleetwatch_cmd()
        .args(["--sample-data", "--store", &store_arg, "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced"));

    // The store file now holds the sample inventory.
    let output = fleetwatch_cmd()
        .args(["--store", &store_arg, "-o", "json", "devices"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 5);

    let output = fleetwatch_cmd()
        .args(["--store", &store_arg, "-o", "json", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_sites"], 3);
    assert_eq!(stats["total_devices"], 5);
    assert_eq!(stats["offline_devices"], stats["total_devices"].as_u64().unwrap() - stats["online_devices"].as_u64().unwrap());
}

#[test]
fn device_filters_apply_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let store_arg = store.to_str().unwrap().to_owned();

    fleetwatch_cmd()
        .args(["--sample-data", "--store", &store_arg, "sync"])
        .assert()
        .success();

    let output = fleetwatch_cmd()
        .args([
            "--store", &store_arg, "-o", "json", "devices", "--status", "offline",
        ])
        .output()
        .unwrap();
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = devices.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["uid"], "dev-003");

    // "all" disables the filter.
    let output = fleetwatch_cmd()
        .args([
            "--store", &store_arg, "-o", "json", "devices", "--status", "all",
        ])
        .output()
        .unwrap();
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 5);
}

#[test]
fn resolve_then_alert_listing_reflects_the_transition() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let store_arg = store.to_str().unwrap().to_owned();

    fleetwatch_cmd()
        .args(["--sample-data", "--store", &store_arg, "sync"])
        .assert()
        .success();

    fleetwatch_cmd()
        .args(["--store", &store_arg, "resolve", "alert-001"])
        .assert()
        .success()
        .stderr(predicate::str::contains("resolved"));

    let output = fleetwatch_cmd()
        .args([
            "--store", &store_arg, "-o", "json", "alerts", "--status", "resolved",
        ])
        .output()
        .unwrap();
    let alerts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let uids: Vec<&str> = alerts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["uid"].as_str().unwrap())
        .collect();
    assert!(uids.contains(&"alert-001"));
}

#[test]
fn plain_output_is_one_uid_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let store_arg = store.to_str().unwrap().to_owned();

    fleetwatch_cmd()
        .args(["--sample-data", "--store", &store_arg, "sync"])
        .assert()
        .success();

    let output = fleetwatch_cmd()
        .args(["--store", &store_arg, "-o", "plain", "sites"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let uids: Vec<&str> = stdout.lines().collect();
    assert_eq!(uids, vec!["site-001", "site-002", "site-003"]);
}
