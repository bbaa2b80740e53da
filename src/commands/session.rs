use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::output::Format;
use crate::store::ledger::Ledger;

pub fn start(root: &Path, role: &str, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let session = db.start_session(role)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&session)?),
        Format::Pretty => {
            println!("Started session {}", session.session_id.cyan().bold());
            println!("  {} {}", "agent:".dimmed(), session.agent_id);
        }
        Format::Minimal => println!("{}", session.session_id),
    }
    Ok(())
}

pub fn log(
    root: &Path,
    session_id: &str,
    action: &str,
    details: Option<&str>,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let entry = db.log_activity(session_id, action, details)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&entry)?),
        Format::Pretty => {
            println!("Logged '{}' to {}", entry.action, session_id.cyan());
        }
        Format::Minimal => println!("{}", entry.id),
    }
    Ok(())
}

pub fn end(root: &Path, session_id: &str, summary: Option<&str>, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let session = db.end_session(session_id, summary)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&session)?),
        Format::Pretty => {
            println!("Ended session {}", session.session_id.cyan().bold());
            if let Some(ref summary) = session.summary {
                println!("  {} {}", "summary:".dimmed(), summary);
            }
        }
        Format::Minimal => println!("{}", session.session_id),
    }
    Ok(())
}

pub fn list(root: &Path, agent: Option<&str>, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let sessions = db.list_sessions(agent)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&sessions)?),
        Format::Pretty => {
            if sessions.is_empty() {
                println!("{}", "No sessions.".dimmed());
            } else {
                for s in &sessions {
                    println!(
                        "{} {} {}",
                        format!("[{}]", s.session_id).cyan(),
                        s.agent_id,
                        s.status,
                    );
                    if let Some(ref summary) = s.summary {
                        println!("  {}", summary.dimmed());
                    }
                }
            }
        }
        Format::Minimal => {
            for s in &sessions {
                println!("{}", s.session_id);
            }
        }
    }
    Ok(())
}

pub fn show(root: &Path, session_id: &str, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let session = db.get_session(session_id)?;
    let activity = db.session_activity(session_id)?;
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "session": session,
                "activity": activity,
            })
        ),
        Format::Pretty => {
            println!(
                "{} {} ({})",
                session.session_id.cyan().bold(),
                session.agent_id,
                session.status
            );
            println!(
                "  {} {}",
                "started:".dimmed(),
                session.started_at.to_rfc3339()
            );
            if let Some(ended) = session.ended_at {
                println!("  {} {}", "ended:".dimmed(), ended.to_rfc3339());
            }
            if let Some(ref summary) = session.summary {
                println!("  {} {}", "summary:".dimmed(), summary);
            }
            for e in &activity {
                println!(
                    "  {} {} {}",
                    e.created_at.format("%H:%M:%S").to_string().dimmed(),
                    e.action,
                    e.details.as_deref().unwrap_or("").dimmed(),
                );
            }
        }
        Format::Minimal => {
            for e in &activity {
                println!("{} {}", e.action, e.details.as_deref().unwrap_or(""));
            }
        }
    }
    Ok(())
}
