//! Basic CLI E2E tests.
//!
//! Each test invokes the compiled binary against its own temporary data
//! directory, so tests never share timer state, tasks or configuration.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timedeck"))
        .env("TIMEDECK_HOME", home)
        .args(args)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn pomodoro_status_reports_defaults() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pomodoro", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["kind"], "work");
    assert_eq!(snapshot["remaining_secs"], 25 * 60);
    assert_eq!(snapshot["display"], "25:00");
    assert_eq!(snapshot["running"], false);
}

#[test]
fn pomodoro_start_pause_persists_between_invocations() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pomodoro", "start"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("session_started"));

    let (stdout, _, code) = run_cli(home.path(), &["pomodoro", "pause"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("session_paused"));

    let (stdout, _, _) = run_cli(home.path(), &["pomodoro", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["running"], false);
}

#[test]
fn pomodoro_set_updates_durations() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pomodoro", "set", "--work", "50"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("config_applied"));

    let (stdout, _, _) = run_cli(home.path(), &["pomodoro", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["remaining_secs"], 50 * 60);
}

#[test]
fn pomodoro_set_rejects_zero() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["pomodoro", "set", "--work", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    // The rejected value must not leak into the stored config.
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "pomodoro.work_minutes"]);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn timer_set_and_status() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["timer", "set", "--minutes", "5", "--seconds", "30"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("05:30"));

    let (stdout, _, code) = run_cli(home.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("05:30 remaining of 05:30"));
}

#[test]
fn timer_rejects_out_of_range_fields() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["timer", "set", "--minutes", "60"]);
    assert_eq!(code, 1);
}

#[test]
fn stopwatch_reset_clears_elapsed() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["stopwatch", "start"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["stopwatch", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["stopwatch", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("00:00.00"));
}

#[test]
fn clock_board_add_list_remove() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["clock", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("New York"));
    assert!(stdout.contains("Tokyo"));

    let (_, _, code) = run_cli(home.path(), &["clock", "add", "Berlin"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["clock", "list"]);
    assert!(stdout.contains("Berlin"));

    let (_, stderr, code) = run_cli(home.path(), &["clock", "add", "Atlantis"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(home.path(), &["clock", "remove", "Berlin"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["clock", "list"]);
    assert!(!stdout.contains("Berlin"));
}

#[test]
fn task_add_done_and_clear() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &[
            "task", "add", "standup", "--time", "09:00", "--priority", "high",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("added standup"));

    let (stdout, _, code) = run_cli(home.path(), &["task", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("standup"));
    assert!(stdout.contains("09:00"));
    assert!(stdout.contains("0/1 done"));

    // The list prints "[ ] <id prefix> ..."; reuse the prefix to toggle.
    let prefix = stdout
        .lines()
        .find(|l| l.contains("standup"))
        .and_then(|l| l.split_whitespace().nth(2))
        .unwrap()
        .to_string();
    let (_, _, code) = run_cli(home.path(), &["task", "done", &prefix]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["task", "list"]);
    assert!(stdout.contains("1/1 done"));

    let (stdout, _, code) = run_cli(home.path(), &["task", "clear"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cleared 1"));
}

#[test]
fn task_rejects_blank_title() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
}

#[test]
fn config_get_set_list() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "pomodoro.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(
        home.path(),
        &["config", "set", "notifications.volume", "80"],
    );
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "notifications.volume"]);
    assert_eq!(stdout.trim(), "80");

    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[pomodoro]"));
    assert!(stdout.contains("work_minutes = 25"));
}

#[test]
fn config_set_rejects_zero_duration() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "pomodoro.short_break_minutes", "0"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn stats_start_empty() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["stats", "all"]);
    assert_eq!(code, 0);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total_sessions"], 0);
    assert_eq!(stats["completed_pomodoros"], 0);
}
