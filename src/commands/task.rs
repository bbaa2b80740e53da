use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::model::{Priority, TaskStatus};
use crate::output::{Format, print_task, print_tasks};
use crate::store::ledger::Ledger;

#[allow(clippy::too_many_arguments)]
pub fn add(
    root: &Path,
    title: &str,
    assigned_to: Option<&str>,
    priority: Priority,
    description: Option<&str>,
    created_by: Option<&str>,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let task = db.add_task(title, assigned_to, priority, description, created_by)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => {
            println!("Created {}", task.task_id.cyan().bold());
            print_task(&task, Format::Pretty)?;
        }
        Format::Minimal => println!("{}", task.task_id),
    }
    Ok(())
}

pub fn list(
    root: &Path,
    status: Option<TaskStatus>,
    assigned_to: Option<&str>,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let tasks = db.list_tasks(status, assigned_to)?;
    if tasks.is_empty() && format == Format::Pretty {
        println!("{}", "No tasks.".dimmed());
        return Ok(());
    }
    print_tasks(&tasks, format)
}

pub fn assign(
    root: &Path,
    task_id: &str,
    assigned_to: &str,
    from: Option<&str>,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    db.assign_task(task_id, assigned_to, from)?;
    let task = db.get_task(task_id)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => println!("Assigned {} to '{}'", task_id.cyan(), assigned_to.cyan()),
        Format::Minimal => println!("{}", task_id),
    }
    Ok(())
}

pub fn set_status(root: &Path, task_id: &str, status: TaskStatus, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let task = db.set_task_status(task_id, status)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => println!("{} -> {}", task.task_id.cyan(), task.status),
        Format::Minimal => println!("{}", task.status),
    }
    Ok(())
}

pub fn done(root: &Path, task_id: &str, format: Format) -> Result<()> {
    set_status(root, task_id, TaskStatus::Done, format)
}
