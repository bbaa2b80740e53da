use chrono::Utc;
use uuid::Uuid;

/// Canonical agent id for a role: uppercased, with anything outside
/// `[A-Za-z0-9]` collapsed to underscores (`backend dev` -> `BACKEND_DEV`).
pub fn agent_id_for_role(role: &str) -> String {
    role.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Short prefix embedded in generated task/session ids: the first four
/// alphanumerics of the role, uppercased. Empty roles yield `AGNT`.
fn role_prefix(role: &str) -> String {
    let prefix: String = role
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(4)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if prefix.is_empty() {
        "AGNT".to_string()
    } else {
        prefix
    }
}

fn stamped(kind: &str, role: &str) -> String {
    // Nanosecond resolution keeps ids distinct across back-to-back
    // invocations from the same agent.
    let ts = Utc::now().format("%Y%m%d%H%M%S%f");
    format!("{}-{}-{}", kind, role_prefix(role), ts)
}

pub fn new_task_id(role: &str) -> String {
    stamped("TASK", role)
}

pub fn new_session_id(role: &str) -> String {
    stamped("SESS", role)
}

pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}
