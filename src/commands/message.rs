use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::output::Format;
use crate::store::ledger::Ledger;

#[allow(clippy::too_many_arguments)]
pub fn send(
    root: &Path,
    from: &str,
    to: Option<&str>,
    subject: &str,
    content: &str,
    message_type: Option<&str>,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let msg = db.send_message(from, to, subject, content, message_type)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&msg)?),
        Format::Pretty => match to {
            Some(to) => println!("Sent to '{}': {}", to.cyan(), subject),
            None => println!("Broadcast: {}", subject),
        },
        Format::Minimal => println!("{}", msg.message_id),
    }
    Ok(())
}

pub fn list(
    root: &Path,
    unread_only: bool,
    limit: Option<u32>,
    offset: u32,
    format: Format,
) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let msgs = db.list_messages(unread_only, limit, offset)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&msgs)?),
        Format::Pretty => {
            if msgs.is_empty() {
                println!("{}", "No messages.".dimmed());
            } else {
                for m in &msgs {
                    let short_id = m.message_id.get(..8).unwrap_or(&m.message_id);
                    let to = m.to_agent.as_deref().unwrap_or("*");
                    let unread = if m.is_read { " " } else { "•" };
                    println!(
                        "{}{} {} {} {}",
                        unread.yellow(),
                        format!("[{}]", short_id).dimmed(),
                        format!("{} -> {}:", m.from_agent, to).cyan(),
                        m.subject,
                        m.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    );
                }
            }
        }
        Format::Minimal => {
            for m in &msgs {
                println!("{}: {}", m.from_agent, m.subject);
            }
        }
    }
    Ok(())
}

pub fn read(root: &Path, id: &str, format: Format) -> Result<()> {
    let db = Ledger::from_workspace(root)?;
    let msg = db.read_message(id)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&msg)?),
        Format::Pretty => {
            println!(
                "{} {}",
                format!("From {}:", msg.from_agent).cyan().bold(),
                msg.subject
            );
            println!("  {}", msg.content);
            println!(
                "  {} {}",
                "sent:".dimmed(),
                msg.created_at.to_rfc3339().dimmed()
            );
        }
        Format::Minimal => println!("{}", msg.content),
    }
    Ok(())
}
