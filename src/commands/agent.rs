use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::output::Format;
use crate::store::ledger::Ledger;

pub fn register(root: &Path, role: &str, focus: Option<&str>, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let agent = db.register(role, focus)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&agent)?),
        Format::Pretty => {
            println!("Registered '{}'", agent.agent_id.cyan().bold());
            if let Some(ref focus) = agent.focus {
                println!("  {} {}", "focus:".dimmed(), focus);
            }
            println!("  {} {}", "status:".dimmed(), agent.status);
        }
        Format::Minimal => println!("{}", agent.agent_id),
    }
    Ok(())
}

pub fn list(root: &Path, include_inactive: bool, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let agents = db.list_agents(include_inactive)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&agents)?),
        Format::Pretty => {
            if agents.is_empty() {
                println!("{}", "No agents registered.".dimmed());
            } else {
                for a in &agents {
                    println!(
                        "{} {} {}",
                        format!("[{}]", a.agent_id).cyan().bold(),
                        a.status,
                        a.focus.as_deref().unwrap_or("").dimmed(),
                    );
                    if let Some(ref working) = a.working_on {
                        println!("  {} {}", "working on:".dimmed(), working);
                    }
                    println!(
                        "  {} {}",
                        "last heartbeat:".dimmed(),
                        a.last_heartbeat.to_rfc3339()
                    );
                }
            }
        }
        Format::Minimal => {
            for a in &agents {
                println!("{}", a.agent_id);
            }
        }
    }
    Ok(())
}

pub fn status(root: &Path, role: &str, working_on: Option<&str>, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    db.update_status(role, working_on)?;
    let agent = db.get_agent(role)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&agent)?),
        Format::Pretty => {
            println!("Updated '{}'", agent.agent_id.cyan().bold());
            if let Some(ref working) = agent.working_on {
                println!("  {} {}", "working on:".dimmed(), working);
            }
        }
        Format::Minimal => println!("{}", agent.agent_id),
    }
    Ok(())
}

pub fn leave(root: &Path, role: &str, summary: Option<&str>, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    db.leave(role, summary)?;
    match format {
        Format::Json => println!("{}", serde_json::json!({"left": role})),
        Format::Pretty => println!("Left: '{}'", role.cyan()),
        Format::Minimal => println!("{role}"),
    }
    Ok(())
}
