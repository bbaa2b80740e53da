use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one best-effort phase of the completion workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StepReport {
    pub fn ok(name: &str, detail: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Ok,
            detail,
        }
    }

    pub fn skipped(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            detail: Some(reason.to_string()),
        }
    }

    pub fn failed(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            detail: Some(reason.to_string()),
        }
    }
}

/// Structured result of the `task complete` workflow. The core mutation
/// (status -> done) has already succeeded by the time one of these exists;
/// the steps record how each best-effort phase went.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub task_id: String,
    pub session_id: String,
    pub completed_by: String,
    pub completed_at: DateTime<Utc>,
    pub summary: String,
    pub steps: Vec<StepReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

impl CompletionReport {
    /// Render the human-readable artifact persisted under
    /// `.agents/sessions/`.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Completion Report: {}\n\n", self.task_id));
        out.push_str(&format!("- task: {}\n", self.task_id));
        out.push_str(&format!("- completed by: {}\n", self.completed_by));
        out.push_str(&format!("- session: {}\n", self.session_id));
        out.push_str(&format!(
            "- completed at: {}\n",
            self.completed_at.to_rfc3339()
        ));
        out.push_str(&format!("- summary: {}\n", self.summary));
        out.push_str("\n## Checklist\n\n");
        for step in &self.steps {
            let mark = if step.status == StepStatus::Ok {
                "x"
            } else {
                " "
            };
            match (&step.status, &step.detail) {
                (StepStatus::Ok, Some(d)) => {
                    out.push_str(&format!("- [{mark}] {}: {d}\n", step.name));
                }
                (StepStatus::Ok, None) => {
                    out.push_str(&format!("- [{mark}] {}\n", step.name));
                }
                (StepStatus::Skipped, d) => out.push_str(&format!(
                    "- [{mark}] {} (skipped{})\n",
                    step.name,
                    d.as_deref()
                        .map(|d| format!(": {d}"))
                        .unwrap_or_default()
                )),
                (StepStatus::Failed, d) => out.push_str(&format!(
                    "- [{mark}] {} (FAILED{})\n",
                    step.name,
                    d.as_deref()
                        .map(|d| format!(": {d}"))
                        .unwrap_or_default()
                )),
            }
        }
        out
    }

    /// True when any best-effort phase failed; the CLI surfaces this as a
    /// warning, never as a non-zero exit.
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Failed)
    }
}
