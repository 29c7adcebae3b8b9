//! Binary-level tests for the study timer CLI.
//!
//! Runs the compiled binary with scripted stdin.

use assert_cmd::Command;
use predicates::prelude::*;

fn studytimer() -> Command {
    let mut cmd = Command::cargo_bin("studytimer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_help_lists_timer_flags() {
    studytimer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--study"))
        .stdout(predicate::str::contains("--break-time"))
        .stdout(predicate::str::contains("--no-sound"));
}

#[test]
fn test_version() {
    studytimer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    studytimer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studytimer"));
}

#[test]
fn test_study_minutes_out_of_range() {
    studytimer()
        .args(["--study", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--study"));
}

#[test]
fn test_unsupported_sound_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"not audio").unwrap();

    studytimer()
        .arg("--sound-file")
        .arg(&path)
        .write_stdin("quit\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid sound file"));
}

// ============================================================================
// Interactive Session
// ============================================================================

#[test]
fn test_session_welcome_and_quit() {
    studytimer()
        .arg("--no-sound")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Study Session  25:00  (idle)"));
}

#[test]
fn test_session_uses_configured_study_length() {
    studytimer()
        .args(["--no-sound", "--study", "90"])
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("90:00"));
}

#[test]
fn test_session_task_workflow() {
    studytimer()
        .arg("--no-sound")
        .write_stdin("add read ch.1\nadd   \nlist\ndone 1\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [ ] read ch.1"))
        .stdout(predicate::str::contains("1. [x] read ch.1"))
        .stdout(predicate::str::contains("Tasks done: 1"))
        .stderr(predicate::str::contains("task text is empty"));
}

#[test]
fn test_session_json_snapshot() {
    studytimer()
        .arg("--no-sound")
        .write_stdin("break\njson\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"break\""))
        .stdout(predicate::str::contains("\"remainingSeconds\": 300"));
}

#[test]
fn test_session_end_of_input_exits_cleanly() {
    studytimer()
        .arg("--no-sound")
        .write_stdin("start\npause\n")
        .assert()
        .success();
}

#[test]
fn test_session_unknown_command_keeps_running() {
    studytimer()
        .arg("--no-sound")
        .write_stdin("dance\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Study Session"));
}
