#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chime(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chime").unwrap();
    cmd.current_dir(dir.path())
        .env("CHIME_DB", dir.path().join("chime.db"));
    cmd
}

fn schedule_args(title: &str, body: &str, rrule: &str) -> Vec<String> {
    [
        "schedule", "--input", "cli", "--title", title, "--body", body, "--rrule", rrule,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ---------------------------------------------------------------------------
// chime schedule (cli mode)
// ---------------------------------------------------------------------------

#[test]
fn schedule_from_flags_creates_the_database() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(schedule_args(
            "Meeting Reminder",
            "Don't forget the meeting at 10 AM",
            "FREQ=DAILY;INTERVAL=1",
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Meeting Reminder"));

    assert!(dir.path().join("chime.db").exists());
}

#[test]
fn schedule_ids_increase_per_entry() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(schedule_args("first", "body", "FREQ=DAILY"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[1]"));
    chime(&dir)
        .args(schedule_args("second", "body", "FREQ=WEEKLY"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[2]"));
}

#[test]
fn empty_title_is_rejected_without_a_database() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(schedule_args("   ", "body", "FREQ=DAILY"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("title is required"));

    assert!(!dir.path().join("chime.db").exists());
}

#[test]
fn empty_body_is_rejected() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(schedule_args("title", "", "FREQ=DAILY"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("body is required"));
}

#[test]
fn missing_rule_is_rejected() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(["schedule", "--input", "cli", "--title", "title", "--body", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recurrence rule is required"));
}

#[test]
fn unparsable_rule_is_rejected() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(schedule_args("title", "body", "EVERY=fortnight"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid recurrence rule"));

    assert!(!dir.path().join("chime.db").exists());
}

#[test]
fn unknown_input_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(["schedule", "--input", "carrier-pigeon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn db_flag_overrides_the_environment() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .args(["--db", "own.db"])
        .args(schedule_args("elsewhere", "body", "FREQ=DAILY"))
        .assert()
        .success();

    assert!(dir.path().join("own.db").exists());
    assert!(!dir.path().join("chime.db").exists());
}

// ---------------------------------------------------------------------------
// chime schedule (stdin mode)
// ---------------------------------------------------------------------------

#[test]
fn schedule_prompts_on_stdin() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .arg("schedule")
        .write_stdin("Water plants\nThe ferns are thirsty\nFREQ=WEEKLY;INTERVAL=1\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Enter title:")
                .and(predicate::str::contains("Enter recurrence rule (RFC5545):"))
                .and(predicate::str::contains("Water plants")),
        );

    assert!(dir.path().join("chime.db").exists());
}

#[test]
fn stdin_fields_are_trimmed() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .arg("schedule")
        .write_stdin("  Spaced  \n  body  \n  FREQ=DAILY  \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("'Spaced'"));
}

#[test]
fn stdin_empty_rule_is_rejected() {
    let dir = TempDir::new().unwrap();
    chime(&dir)
        .arg("schedule")
        .write_stdin("title\nbody\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("recurrence rule is required"));
}

// ---------------------------------------------------------------------------
// chime daemon
// ---------------------------------------------------------------------------

#[test]
fn daemon_fails_fast_on_an_unopenable_database() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("blocker"), "not a directory").unwrap();

    chime(&dir)
        .args(["--db", "blocker/chime.db", "daemon"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("open schedule database"));
}
