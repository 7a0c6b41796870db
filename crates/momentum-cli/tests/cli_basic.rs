//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify exit codes and outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let shared = std::env::temp_dir().join("momentum-cli-test-shared");
    let output = Command::new("cargo")
        .args(["run", "-p", "momentum-cli", "--"])
        .args(args)
        .env("MOMENTUM_ENV", "dev")
        .env("MOMENTUM_SHARED_DIR", &shared)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn todo_add_and_list() {
    let (stdout, _, code) = run_cli(&["todo", "add", "Test Todo"]);
    assert_eq!(code, 0, "todo add failed");
    assert!(stdout.contains("Todo created:"));

    let (stdout, _, code) = run_cli(&["todo", "list"]);
    assert_eq!(code, 0, "todo list failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout.trim()).is_ok() || !stdout.is_empty());
}

#[test]
fn todo_done_roundtrip() {
    let (stdout, _, code) = run_cli(&["todo", "add", "Done Test"]);
    assert_eq!(code, 0);
    let id = stdout
        .lines()
        .next()
        .and_then(|l| l.strip_prefix("Todo created: "))
        .expect("missing created id")
        .to_string();

    let (stdout, _, code) = run_cli(&["todo", "done", &id]);
    assert_eq!(code, 0, "todo done failed");
    assert!(stdout.contains("\"completed\": true"));

    let (_, _, code) = run_cli(&["todo", "delete", &id]);
    assert_eq!(code, 0);
}

#[test]
fn habit_add_check_and_delete() {
    let (stdout, _, code) = run_cli(&["habit", "add", "Test Habit"]);
    assert_eq!(code, 0, "habit add failed");
    let id = stdout
        .lines()
        .next()
        .and_then(|l| l.strip_prefix("Habit created: "))
        .expect("missing created id")
        .to_string();

    let (_, _, code) = run_cli(&["habit", "check", &id]);
    assert_eq!(code, 0, "habit check failed");

    let (_, _, code) = run_cli(&["habit", "delete", &id]);
    assert_eq!(code, 0, "habit delete failed");
}

#[test]
fn monthly_habit_requires_day_of_month() {
    let (_, stderr, code) = run_cli(&["habit", "add", "Rent", "--frequency", "monthly"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("day-of-month"));
}

#[test]
fn stats_show_and_streak() {
    let (_, _, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "stats show failed");

    let (stdout, _, code) = run_cli(&["stats", "streak"]);
    assert_eq!(code, 0, "stats streak failed");
    assert!(stdout.trim().parse::<u32>().is_ok());
}

#[test]
fn widget_show_is_never_an_error() {
    let (stdout, _, code) = run_cli(&["widget", "show"]);
    assert_eq!(code, 0, "widget show failed");
    assert!(stdout.contains("updated_at"));
}

#[test]
fn config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("todo_limit"));
}
