use clap::ValueEnum;

use crate::error::Result;
use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => {
            println!("[{}] {} ({})", task.task_id, task.title, task.status);
            if let Some(ref desc) = task.description {
                println!("  {}", desc);
            }
            println!("  priority: {} | status: {}", task.priority, task.status);
            if let Some(ref assignee) = task.assigned_to {
                println!("  assigned to: {}", assignee);
            }
            if let Some(ref creator) = task.created_by {
                println!("  created by: {}", creator);
            }
            if let Some(completed) = task.completed_at {
                println!("  completed at: {}", completed.to_rfc3339());
            }
        }
        Format::Minimal => {
            let assignee = task.assigned_to.as_deref().unwrap_or("-");
            let title = truncate_title(&task.title, 24);
            println!(
                "{:24} {:11} {:6} {}",
                title, task.status, task.priority, assignee
            );
        }
    }
    Ok(())
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            for task in tasks {
                print_task(task, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!("{:24} {:11} {:6} ASSIGNEE", "TITLE", "STATUS", "PRIO");
            println!("{}", "-".repeat(50));
            for task in tasks {
                print_task(task, Format::Minimal)?;
            }
        }
    }
    Ok(())
}
