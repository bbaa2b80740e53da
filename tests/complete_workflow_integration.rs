use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn run_hive(root: &Path, args: &[&str]) -> Output {
    let binary = assert_cmd::cargo::cargo_bin!("hive");
    let mut cmd = Command::new(binary);
    cmd.current_dir(root);
    cmd.env_remove("HIVE_AGENT");
    cmd.arg("--format").arg("json");
    cmd.args(args);
    cmd.output().expect("hive command executes")
}

fn run_hive_ok(root: &Path, args: &[&str]) -> Output {
    let output = run_hive(root, args);
    assert!(
        output.status.success(),
        "hive {:?} failed:\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn run_hive_json(root: &Path, args: &[&str]) -> Value {
    let output = run_hive_ok(root, args);
    serde_json::from_slice(&output.stdout).expect("valid json stdout")
}

fn step<'a>(report: &'a Value, name: &str) -> &'a Value {
    report["steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == name)
        .unwrap_or_else(|| panic!("step {name} missing from report"))
}

#[test]
fn complete_marks_done_broadcasts_and_writes_report() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "Ship feature"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();
    let session = run_hive_json(root, &["session", "start", "backend_dev"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    let report = run_hive_json(
        root,
        &[
            "task",
            "complete",
            &task_id,
            "--session",
            &session_id,
            "--role",
            "backend_dev",
            "--summary",
            "implemented and tested",
        ],
    );
    assert_eq!(report["task_id"], task_id.as_str());
    assert_eq!(report["completed_by"], "BACKEND_DEV");

    let done = run_hive_json(root, &["task", "list", "--status", "done"]);
    assert_eq!(done[0]["task_id"], task_id.as_str());
    assert!(done[0]["completed_at"].is_string());

    let msgs = run_hive_json(root, &["message", "list"]);
    let announce = msgs
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["subject"] == format!("Task Complete: {task_id}"))
        .expect("completion broadcast exists");
    assert!(announce.get("to_agent").is_none() || announce["to_agent"].is_null());
    assert_eq!(announce["content"], "implemented and tested");

    assert_eq!(step(&report, "activity_log")["status"], "ok");
    assert_eq!(step(&report, "broadcast")["status"], "ok");
    assert_eq!(step(&report, "backup")["status"], "ok");
    // tempdir is not a git repository
    assert_eq!(step(&report, "sync")["status"], "skipped");
    // no CHANGELOG.md in a fresh workspace
    assert_eq!(step(&report, "changelog")["status"], "skipped");

    let report_path = report["report_path"].as_str().expect("report written");
    let contents = std::fs::read_to_string(report_path).unwrap();
    assert!(contents.contains(&task_id));
    assert!(contents.contains("implemented and tested"));

    let backups: Vec<_> = std::fs::read_dir(root.join(".agents").join("backups"))
        .unwrap()
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn complete_logs_against_the_session() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "t"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();
    let session = run_hive_json(root, &["session", "start", "qa"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    run_hive_ok(
        root,
        &[
            "task", "complete", &task_id, "--session", &session_id, "--role", "qa",
            "--summary", "verified",
        ],
    );

    let detail = run_hive_json(root, &["session", "show", &session_id]);
    let activity = detail["activity"].as_array().unwrap();
    assert!(activity.iter().any(|a| a["action"] == "task_complete"));
}

#[test]
fn no_backup_flag_skips_the_backup_phase() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "t"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();
    let session = run_hive_json(root, &["session", "start", "qa"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    let report = run_hive_json(
        root,
        &[
            "task", "complete", &task_id, "--session", &session_id, "--role", "qa",
            "--summary", "done", "--no-backup", "--no-sync",
        ],
    );
    assert_eq!(step(&report, "backup")["status"], "skipped");
    assert_eq!(step(&report, "sync")["status"], "skipped");
    assert!(!root.join(".agents").join("backups").exists());
}

#[test]
fn changelog_mentioning_the_task_passes_the_check() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "t"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();
    let session = run_hive_json(root, &["session", "start", "qa"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    std::fs::write(
        root.join("CHANGELOG.md"),
        format!("## Unreleased\n- {task_id}: finished\n"),
    )
    .unwrap();

    let report = run_hive_json(
        root,
        &[
            "task", "complete", &task_id, "--session", &session_id, "--role", "qa",
            "--summary", "done",
        ],
    );
    assert_eq!(step(&report, "changelog")["status"], "ok");
}

#[test]
fn changelog_without_the_task_fails_the_check_but_not_the_command() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "t"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();
    let session = run_hive_json(root, &["session", "start", "qa"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    std::fs::write(root.join("CHANGELOG.md"), "## Unreleased\n- nothing\n").unwrap();

    let report = run_hive_json(
        root,
        &[
            "task", "complete", &task_id, "--session", &session_id, "--role", "qa",
            "--summary", "done",
        ],
    );
    assert_eq!(step(&report, "changelog")["status"], "failed");

    // the core mutation still happened
    let done = run_hive_json(root, &["task", "list", "--status", "done"]);
    assert_eq!(done[0]["task_id"], task_id.as_str());
}

#[test]
fn complete_unknown_task_exits_not_found_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    run_hive_ok(root, &["agent", "register", "qa"]);

    let output = run_hive(
        root,
        &[
            "task", "complete", "TASK-NONE-0", "--session", "SESS-NONE-0", "--role", "qa",
            "--summary", "x",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"], "task_not_found");

    assert!(!root.join(".agents").join("sessions").exists());
    assert!(!root.join(".agents").join("backups").exists());
}
