use std::fs;
use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use crate::error::Result;
use crate::git::{self, PushOutcome};
use crate::ids::agent_id_for_role;
use crate::model::TaskStatus;
use crate::output::Format;
use crate::report::{CompletionReport, StepReport, StepStatus};
use crate::store::ledger::Ledger;
use crate::store::workspace;

/// Which optional phases to attempt.
#[derive(Debug, Clone, Copy)]
pub struct CompleteOptions {
    pub backup: bool,
    pub sync: bool,
}

/// The task-completion workflow. The core mutation (status -> done) runs
/// first and is the only phase that can fail the command; everything after
/// it is best-effort and lands in the report as ok/skipped/failed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    root: &Path,
    task_id: &str,
    session_id: &str,
    role: &str,
    summary: &str,
    opts: CompleteOptions,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let task = db.set_task_status(task_id, TaskStatus::Done)?;

    let mut steps = Vec::new();

    match db.log_activity(session_id, "task_complete", Some(summary)) {
        Ok(_) => steps.push(StepReport::ok("activity_log", None)),
        Err(e) => steps.push(StepReport::failed("activity_log", &e.to_string())),
    }

    let completer = agent_id_for_role(role);
    match db.send_message(
        &completer,
        None,
        &format!("Task Complete: {}", task.task_id),
        summary,
        None,
    ) {
        Ok(_) => steps.push(StepReport::ok("broadcast", None)),
        Err(e) => steps.push(StepReport::failed("broadcast", &e.to_string())),
    }

    steps.push(changelog_step(root, &task.task_id));
    steps.push(if opts.backup {
        backup_step(root)
    } else {
        StepReport::skipped("backup", "disabled")
    });
    steps.push(if opts.sync {
        sync_step(root)
    } else {
        StepReport::skipped("sync", "disabled")
    });

    let mut report = CompletionReport {
        task_id: task.task_id.clone(),
        session_id: session_id.to_string(),
        completed_by: completer,
        completed_at: task.completed_at.unwrap_or_else(Utc::now),
        summary: summary.to_string(),
        steps,
        report_path: None,
    };

    match write_report(root, &report) {
        Ok(path) => {
            report.report_path = Some(path.clone());
            report
                .steps
                .push(StepReport::ok("completion_report", Some(path)));
        }
        Err(e) => {
            report
                .steps
                .push(StepReport::failed("completion_report", &e.to_string()));
        }
    }

    print_report(&report, format)
}

/// Best-effort check that the changelog mentions the completed task.
/// Absence of a changelog is not a failure; an unmentioned task is.
fn changelog_step(root: &Path, task_id: &str) -> StepReport {
    let path = root.join("CHANGELOG.md");
    if !path.is_file() {
        return StepReport::skipped("changelog", "no CHANGELOG.md");
    }
    match fs::read_to_string(&path) {
        Ok(contents) if contents.contains(task_id) => {
            StepReport::ok("changelog", Some(format!("{task_id} mentioned")))
        }
        Ok(_) => StepReport::failed("changelog", &format!("{task_id} not mentioned")),
        Err(e) => StepReport::failed("changelog", &e.to_string()),
    }
}

/// Copy the store file into `.agents/backups/`.
fn backup_step(root: &Path) -> StepReport {
    let src = workspace::db_path(root);
    let dir = match workspace::backups_dir(root) {
        Ok(dir) => dir,
        Err(e) => return StepReport::failed("backup", &e.to_string()),
    };
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let dest = dir.join(format!("project_kb-{stamp}.db"));
    match fs::copy(&src, &dest) {
        Ok(_) => StepReport::ok("backup", Some(dest.display().to_string())),
        Err(e) => StepReport::failed("backup", &e.to_string()),
    }
}

fn sync_step(root: &Path) -> StepReport {
    match git::push_current_branch(root) {
        PushOutcome::Pushed { branch } => {
            StepReport::ok("sync", Some(format!("pushed {branch} to origin")))
        }
        PushOutcome::NoRepository => StepReport::skipped("sync", "not a git repository"),
        PushOutcome::NoRemote => StepReport::skipped("sync", "no origin remote"),
        PushOutcome::DetachedHead => StepReport::skipped("sync", "no branch checked out"),
        PushOutcome::Failed(msg) => StepReport::failed("sync", &msg),
    }
}

fn write_report(root: &Path, report: &CompletionReport) -> Result<String> {
    let dir = workspace::sessions_dir(root)?;
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let path = dir.join(format!("completion-{}-{stamp}.md", report.task_id));
    fs::write(&path, report.render_markdown())?;
    Ok(path.display().to_string())
}

fn print_report(report: &CompletionReport, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(report)?),
        Format::Pretty => {
            println!(
                "Completed {} ({})",
                report.task_id.cyan().bold(),
                report.summary
            );
            for step in &report.steps {
                let (mark, name) = match step.status {
                    StepStatus::Ok => ("✓".green(), step.name.normal()),
                    StepStatus::Skipped => ("-".dimmed(), step.name.dimmed()),
                    StepStatus::Failed => ("✗".red(), step.name.red()),
                };
                match &step.detail {
                    Some(d) => println!("  {mark} {name} {}", d.dimmed()),
                    None => println!("  {mark} {name}"),
                }
            }
            if report.has_failures() {
                println!(
                    "{}",
                    "warning: some optional phases failed (task is still done)".yellow()
                );
            }
        }
        Format::Minimal => println!("{}", report.task_id),
    }
    Ok(())
}
