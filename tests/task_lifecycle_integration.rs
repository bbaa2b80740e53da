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

#[test]
fn assigned_task_appears_in_filters_and_notifies() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(
        root,
        &[
            "task",
            "add",
            "Fix login bug",
            "--assigned-to",
            "BACKEND_DEV",
            "--priority",
            "high",
        ],
    );
    let task_id = task["task_id"].as_str().unwrap().to_string();
    assert!(task_id.starts_with("TASK-"));
    assert_eq!(task["status"], "open");
    assert_eq!(task["priority"], "high");

    let mine = run_hive_json(root, &["task", "list", "--assigned-to", "BACKEND_DEV"]);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["task_id"], task_id.as_str());

    let msgs = run_hive_json(root, &["message", "list"]);
    assert!(
        msgs.as_array()
            .unwrap()
            .iter()
            .any(|m| m["to_agent"] == "BACKEND_DEV"
                && m["subject"] == "New Task Assigned: Fix login bug")
    );
}

#[test]
fn done_moves_task_between_status_filters() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "Write docs"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();

    let open = run_hive_json(root, &["task", "list", "--status", "open"]);
    assert_eq!(open[0]["task_id"], task_id.as_str());

    let done = run_hive_json(root, &["task", "done", &task_id]);
    assert_eq!(done["status"], "done");
    assert!(done["completed_at"].is_string());

    let open = run_hive_json(root, &["task", "list", "--status", "open"]);
    assert!(open.as_array().unwrap().is_empty());
    let finished = run_hive_json(root, &["task", "list", "--status", "done"]);
    assert_eq!(finished[0]["task_id"], task_id.as_str());
}

#[test]
fn any_status_transition_is_allowed_and_clears_completed_at() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "flappy task"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();

    run_hive_ok(root, &["task", "done", &task_id]);
    let reopened = run_hive_json(root, &["task", "status", &task_id, "in_progress"]);
    assert_eq!(reopened["status"], "in_progress");
    assert!(reopened.get("completed_at").is_none() || reopened["completed_at"].is_null());

    let blocked = run_hive_json(root, &["task", "status", &task_id, "blocked"]);
    assert_eq!(blocked["status"], "blocked");
}

#[test]
fn assign_sends_notification_from_assigner() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "Review PR"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();

    let assigned = run_hive_json(
        root,
        &["task", "assign", &task_id, "--to", "QA", "--from", "LEAD"],
    );
    assert_eq!(assigned["assigned_to"], "QA");

    let msgs = run_hive_json(root, &["message", "list"]);
    assert!(
        msgs.as_array()
            .unwrap()
            .iter()
            .any(|m| m["to_agent"] == "QA" && m["from_agent"] == "LEAD")
    );
}

#[test]
fn assign_unknown_task_exits_not_found() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let output = run_hive(root, &["task", "assign", "TASK-NONE-0", "--to", "QA"]);
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"], "task_not_found");
}

#[test]
fn invalid_status_value_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let task = run_hive_json(root, &["task", "add", "t"]);
    let task_id = task["task_id"].as_str().unwrap().to_string();

    let output = run_hive(root, &["task", "status", &task_id, "cancelled"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn list_is_most_recent_first() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    run_hive_ok(root, &["task", "add", "first"]);
    run_hive_ok(root, &["task", "add", "second"]);

    let tasks = run_hive_json(root, &["task", "list"]);
    assert_eq!(tasks[0]["title"], "second");
    assert_eq!(tasks[1]["title"], "first");
}
