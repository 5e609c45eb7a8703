//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_timesheet"))
        .args(args)
        .env("TIMESHEET_HOME", home)
        .env("TIMESHEET_API_KEY", "test-key")
        .env_remove("TIMESHEET_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn start(home: &Path, description: &str) -> String {
    let event = run_json(home, &["start", description]);
    assert_eq!(event["type"], "TimerStarted");
    event["id"].as_str().unwrap().to_string()
}

#[test]
fn test_start_and_status() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Write report");

    let snapshot = run_json(home.path(), &["status", "--json"]);
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["timers"][0]["id"], id.as_str());
    assert_eq!(snapshot["timers"][0]["status"], "running");

    let (code, stdout, _) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Write report"));
}

#[test]
fn test_start_rejects_blank_description() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["start", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_pause_resume_stop_by_prefix() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Email");
    let prefix = &id[..8];

    let paused = run_json(home.path(), &["pause", prefix]);
    assert_eq!(paused["type"], "TimerPaused");

    // Second pause is a no-op and reports the snapshot instead.
    let again = run_json(home.path(), &["pause", prefix]);
    assert_eq!(again["type"], "StateSnapshot");
    assert_eq!(again["timers"][0]["status"], "paused");

    let resumed = run_json(home.path(), &["resume", prefix]);
    assert_eq!(resumed["type"], "TimerResumed");

    let stopped = run_json(home.path(), &["stop", prefix]);
    assert_eq!(stopped["type"], "TimerStopped");
    assert_eq!(stopped["item"]["id"], id.as_str());
    assert_eq!(stopped["item"]["description"], "Email");

    let snapshot = run_json(home.path(), &["status", "--json"]);
    assert_eq!(snapshot["timers"].as_array().unwrap().len(), 0);
    assert_eq!(snapshot["history_len"], 1);
}

#[test]
fn test_stop_unknown_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["stop", "does-not-exist"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("does-not-exist"));
}

#[test]
fn test_pause_unknown_is_noop() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["pause", "does-not-exist"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_history_groups_today() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Review");
    run_json(home.path(), &["stop", &id]);

    let groups = run_json(home.path(), &["history", "--json"]);
    assert_eq!(groups[0]["label"], "Today");
    assert_eq!(groups[0]["items"][0]["description"], "Review");

    let (code, stdout, _) = run_cli(home.path(), &["history"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Today"));
    assert!(stdout.contains("Review"));
}

#[test]
fn test_history_labels_follow_locale() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "locale", "pt-BR"]);
    assert_eq!(code, 0);
    let id = start(home.path(), "Revisão");
    run_json(home.path(), &["stop", &id]);

    let groups = run_json(home.path(), &["history", "--json"]);
    assert_eq!(groups[0]["label"], "Hoje");
}

#[test]
fn test_delete_and_clear() {
    let home = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c"] {
        let id = start(home.path(), name);
        run_json(home.path(), &["stop", &id]);
    }
    let groups = run_json(home.path(), &["history", "--json"]);
    let first = groups[0]["items"][0]["id"].as_str().unwrap().to_string();

    let deleted = run_json(home.path(), &["delete", &first]);
    assert_eq!(deleted["type"], "HistoryDeleted");

    let cleared = run_json(home.path(), &["clear"]);
    assert_eq!(cleared["type"], "HistoryCleared");
    assert_eq!(cleared["removed"], 2);
}

#[test]
fn test_summary_with_empty_history() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["summary"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No completed activities to analyze."));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "display.refresh_interval_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "100");

    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "display.refresh_interval_ms", "250"],
    );
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "display.refresh_interval_ms"]);
    assert_eq!(stdout.trim(), "250");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "nope", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_watch_paused_timer_returns() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Paused work");
    run_json(home.path(), &["pause", &id]);
    let (code, stdout, _) = run_cli(home.path(), &["watch", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(paused)"));
}

/// Spawn `watch <id>` and wait for it to exit after `action` runs from a
/// second process. Returns the exit code.
fn watch_until(home: &Path, id: &str, action: &[&str]) -> i32 {
    let mut child = Command::new(env!("CARGO_BIN_EXE_timesheet"))
        .args(["watch", id])
        .env("TIMESHEET_HOME", home)
        .env_remove("TIMESHEET_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn watch");

    sleep(Duration::from_millis(500));
    assert!(
        child.try_wait().unwrap().is_none(),
        "watch exited while the timer was still running"
    );

    let (code, _, stderr) = run_cli(home, action);
    assert_eq!(code, 0, "{action:?} failed: {stderr}");

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status.code().unwrap_or(-1);
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            panic!("watch did not exit after {action:?}");
        }
        sleep(Duration::from_millis(50));
    }
}

#[test]
fn test_watch_ends_when_timer_paused_elsewhere() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Live work");
    assert_eq!(watch_until(home.path(), &id, &["pause", &id]), 0);
}

#[test]
fn test_watch_ends_when_timer_stopped_elsewhere() {
    let home = tempfile::tempdir().unwrap();
    let id = start(home.path(), "Live work");
    assert_eq!(watch_until(home.path(), &id, &["stop", &id]), 0);
}
