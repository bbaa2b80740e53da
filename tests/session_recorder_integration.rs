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
fn start_log_end_round_trip() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let session = run_hive_json(root, &["session", "start", "REVIEWER"]);
    let session_id = session["session_id"].as_str().unwrap().to_string();
    assert!(session_id.starts_with("SESS-REVI-"));
    assert_eq!(session["status"], "active");

    run_hive_ok(
        root,
        &[
            "session", "log", &session_id, "--action", "review", "--details", "PR #12",
        ],
    );

    let ended = run_hive_json(
        root,
        &["session", "end", &session_id, "--summary", "Reviewed 3 PRs"],
    );
    assert_eq!(ended["status"], "completed");
    assert_eq!(ended["summary"], "Reviewed 3 PRs");
    assert!(ended["ended_at"].is_string());

    let sessions = run_hive_json(root, &["session", "list"]);
    assert_eq!(sessions[0]["status"], "completed");
    assert_eq!(sessions[0]["summary"], "Reviewed 3 PRs");

    let detail = run_hive_json(root, &["session", "show", &session_id]);
    assert_eq!(detail["activity"].as_array().unwrap().len(), 1);
    assert_eq!(detail["activity"][0]["action"], "review");
    assert_eq!(detail["activity"][0]["agent_id"], "REVIEWER");
}

#[test]
fn log_accepts_unknown_session() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    // The recorder does not validate session references.
    let entry = run_hive_json(
        root,
        &["session", "log", "SESS-GHOST-0", "--action", "poke"],
    );
    assert_eq!(entry["agent_id"], "unknown");
}

#[test]
fn end_unknown_session_exits_not_found() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let output = run_hive(root, &["session", "end", "SESS-GHOST-0"]);
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"], "session_not_found");
}

#[test]
fn list_filters_by_agent() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    run_hive_ok(root, &["session", "start", "alice"]);
    run_hive_ok(root, &["session", "start", "bob"]);
    run_hive_ok(root, &["session", "start", "alice"]);

    let all = run_hive_json(root, &["session", "list"]);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let alices = run_hive_json(root, &["session", "list", "--agent", "alice"]);
    assert_eq!(alices.as_array().unwrap().len(), 2);
    assert!(
        alices
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["agent_id"] == "ALICE")
    );
}
