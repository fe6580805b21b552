//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_maisonvital"))
        .args(args)
        .env("MAISONVITAL_HOME", home)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

#[test]
fn test_catalog_list() {
    let home = tempfile::tempdir().unwrap();
    let assets = run_json(home.path(), &["catalog", "list"]);
    let assets = assets.as_array().unwrap();
    assert_eq!(assets.len(), 6);
    assert_eq!(assets[0]["id"], "asset_001");
    assert_eq!(assets[3]["severity"], "critical");
}

#[test]
fn test_catalog_show_unknown_asset_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["catalog", "show", "asset_999"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_track_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["track", "add", "asset_004", "asset_001"]);
    let tracked = run_json(home.path(), &["track", "list"]);
    assert_eq!(tracked, serde_json::json!(["asset_001", "asset_004"]));

    run_json(home.path(), &["track", "remove", "asset_004"]);
    let tracked = run_json(home.path(), &["track", "list"]);
    assert_eq!(tracked, serde_json::json!(["asset_001"]));
}

#[test]
fn test_review_with_answers() {
    let home = tempfile::tempdir().unwrap();
    let events = run_json(
        home.path(),
        &["review", "asset_002", "asset_006", "--answers", "do-now,not-done"],
    );
    let events = events.as_array().unwrap();
    assert_eq!(events[0]["type"], "review_started");
    assert_eq!(events.last().unwrap()["type"], "review_finished");
    // Gutters (minor) left urgent: 100 - 25.
    assert_eq!(events.last().unwrap()["health_score"], 75);

    let stats = run_json(home.path(), &["stats"]);
    assert_eq!(stats["xp"], 60);
    assert_eq!(stats["health_score"], 75);
    assert_eq!(stats["total_tasks_completed"], 1);
}

#[test]
fn test_review_aborts_when_answers_run_out() {
    let home = tempfile::tempdir().unwrap();
    let events = run_json(
        home.path(),
        &["review", "asset_001", "asset_002", "--answers", "done-recently"],
    );
    let last = events.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["type"], "review_aborted");
    assert_eq!(last["reviewed"], 1);
}

#[test]
fn test_review_without_selection_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["review", "--answers", "do-now"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_quickfix_then_status() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["track", "add", "asset_003"]);
    let events = run_json(home.path(), &["quickfix", "asset_003"]);
    assert!(events
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["type"] == "xp_gained"));

    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["health_score"], 100);
    assert_eq!(status["time_debt_minutes"], 0);
    assert_eq!(status["assets"][0]["status"], "ok");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "review.transition_delay_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "300");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "review.transition_delay_ms", "0"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "review.transition_delay_ms"]);
    assert_eq!(stdout.trim(), "0");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_review_of_subset_keeps_tracked_assets() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["track", "add", "asset_001", "asset_004"]);
    run_json(home.path(), &["quickfix", "asset_001"]);
    run_json(home.path(), &["review", "asset_004", "--answers", "not-done"]);

    let tracked = run_json(home.path(), &["track", "list"]);
    assert_eq!(tracked, serde_json::json!(["asset_001", "asset_004"]));
    let status = run_json(home.path(), &["status"]);
    let shower = status["assets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["asset_id"] == "asset_001")
        .unwrap()
        .clone();
    assert_eq!(shower["status"], "ok");
}
