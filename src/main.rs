use clap::{Parser, Subcommand};
use hive::error::{HiveError, Result};
use hive::model::{Priority, TaskStatus};
use hive::output::Format;

#[derive(Parser)]
#[command(
    name = "hive",
    version,
    long_version = hive::build_info::long_version(),
    about = "Multi-agent coordination ledger for agentic workflows"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Agent registry: who is working on this codebase
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },
    /// Point-to-point and broadcast messaging between agents
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },
    /// Session recording: bracketed spans of agent activity
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// The task ledger
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// Register (or re-register) an agent; idempotent
    Register {
        /// Role name (default: $HIVE_AGENT)
        role: Option<String>,
        /// Human-readable specialization
        #[arg(long)]
        focus: Option<String>,
    },
    /// List registered agents
    List {
        /// Include inactive agents
        #[arg(long)]
        all: bool,
    },
    /// Update what an agent is working on (refreshes heartbeat)
    Status {
        /// Role name (default: $HIVE_AGENT)
        role: Option<String>,
        /// Current task description
        #[arg(long)]
        working_on: Option<String>,
    },
    /// Deactivate an agent; optional summary is broadcast
    Leave {
        /// Role name (default: $HIVE_AGENT)
        role: Option<String>,
        /// Handoff summary to broadcast
        #[arg(long)]
        summary: Option<String>,
    },
}

#[derive(Subcommand)]
enum MessageAction {
    /// Send a direct message to an agent
    Send {
        /// Sender (default: $HIVE_AGENT)
        #[arg(long)]
        from: Option<String>,
        /// Recipient agent id
        #[arg(long)]
        to: String,
        /// Message subject
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        content: String,
        /// Message type (default: notification)
        #[arg(long = "type")]
        message_type: Option<String>,
    },
    /// Broadcast a message to all agents
    Broadcast {
        /// Sender (default: $HIVE_AGENT)
        #[arg(long)]
        from: Option<String>,
        /// Message subject
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        content: String,
    },
    /// List messages, most recent first
    List {
        /// Show only unread messages
        #[arg(long)]
        unread: bool,
        /// Page size
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Number of messages to skip
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Mark a message read and print it
    Read {
        /// Message id
        id: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Start a new session for a role
    Start {
        /// Role name (default: $HIVE_AGENT)
        role: Option<String>,
    },
    /// Append an entry to the session's activity log
    Log {
        /// Session id
        id: String,
        /// What happened
        #[arg(long)]
        action: String,
        /// Free-form details
        #[arg(long)]
        details: Option<String>,
    },
    /// End a session
    End {
        /// Session id
        id: String,
        /// Closing summary
        #[arg(long)]
        summary: Option<String>,
    },
    /// List sessions, most recent first
    List {
        /// Filter by agent role
        #[arg(long)]
        agent: Option<String>,
    },
    /// Show one session with its activity log
    Show {
        /// Session id
        id: String,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Assignee agent id (sends a notification)
        #[arg(long)]
        assigned_to: Option<String>,
        /// Task priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,
        /// Task description
        #[arg(long, short)]
        description: Option<String>,
        /// Creator agent id
        #[arg(long)]
        created_by: Option<String>,
    },
    /// List tasks with optional filters (AND semantics)
    List {
        /// Filter by status
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// Filter by assignee
        #[arg(long)]
        assigned_to: Option<String>,
    },
    /// Reassign a task (sends a notification)
    Assign {
        /// Task id
        id: String,
        /// New assignee agent id
        #[arg(long)]
        to: String,
        /// Who is assigning (default: $HIVE_AGENT)
        #[arg(long)]
        from: Option<String>,
    },
    /// Set a task's status (any transition is allowed)
    Status {
        /// Task id
        id: String,
        /// New status
        #[arg(value_enum)]
        new_status: TaskStatus,
    },
    /// Mark a task done
    Done {
        /// Task id
        id: String,
    },
    /// Completion workflow: mark done, log, broadcast, and write a report
    Complete {
        /// Task id
        id: String,
        /// Session to log the completion against
        #[arg(long)]
        session: String,
        /// Completing role (default: $HIVE_AGENT)
        #[arg(long)]
        role: Option<String>,
        /// What was accomplished
        #[arg(long)]
        summary: String,
        /// Skip the store backup phase
        #[arg(long)]
        no_backup: bool,
        /// Skip the git push phase
        #[arg(long)]
        no_sync: bool,
    },
}

fn require_role(role: Option<String>) -> Result<String> {
    role.or_else(hive::identity::resolve_role).ok_or_else(|| {
        HiveError::Validation("role required (pass a role or set HIVE_AGENT)".into())
    })
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let root = hive::store::workspace::find_workspace_root()?;

    match cli.command {
        Commands::Agent { action } => match action {
            AgentAction::Register { role, focus } => {
                let role = require_role(role)?;
                hive::commands::agent::register(&root, &role, focus.as_deref(), format)
            }
            AgentAction::List { all } => hive::commands::agent::list(&root, all, format),
            AgentAction::Status { role, working_on } => {
                let role = require_role(role)?;
                hive::commands::agent::status(&root, &role, working_on.as_deref(), format)
            }
            AgentAction::Leave { role, summary } => {
                let role = require_role(role)?;
                hive::commands::agent::leave(&root, &role, summary.as_deref(), format)
            }
        },
        Commands::Message { action } => match action {
            MessageAction::Send {
                from,
                to,
                subject,
                content,
                message_type,
            } => {
                let from = require_role(from)?;
                hive::commands::message::send(
                    &root,
                    &from,
                    Some(&to),
                    &subject,
                    &content,
                    message_type.as_deref(),
                    format,
                )
            }
            MessageAction::Broadcast {
                from,
                subject,
                content,
            } => {
                let from = require_role(from)?;
                hive::commands::message::send(&root, &from, None, &subject, &content, None, format)
            }
            MessageAction::List {
                unread,
                limit,
                offset,
            } => hive::commands::message::list(&root, unread, Some(limit), offset, format),
            MessageAction::Read { id } => hive::commands::message::read(&root, &id, format),
        },
        Commands::Session { action } => match action {
            SessionAction::Start { role } => {
                let role = require_role(role)?;
                hive::commands::session::start(&root, &role, format)
            }
            SessionAction::Log {
                id,
                action,
                details,
            } => hive::commands::session::log(&root, &id, &action, details.as_deref(), format),
            SessionAction::End { id, summary } => {
                hive::commands::session::end(&root, &id, summary.as_deref(), format)
            }
            SessionAction::List { agent } => {
                hive::commands::session::list(&root, agent.as_deref(), format)
            }
            SessionAction::Show { id } => hive::commands::session::show(&root, &id, format),
        },
        Commands::Task { action } => match action {
            TaskAction::Add {
                title,
                assigned_to,
                priority,
                description,
                created_by,
            } => hive::commands::task::add(
                &root,
                &title,
                assigned_to.as_deref(),
                priority,
                description.as_deref(),
                created_by.as_deref(),
                format,
            ),
            TaskAction::List {
                status,
                assigned_to,
            } => hive::commands::task::list(&root, status, assigned_to.as_deref(), format),
            TaskAction::Assign { id, to, from } => {
                hive::commands::task::assign(&root, &id, &to, from.as_deref(), format)
            }
            TaskAction::Status { id, new_status } => {
                hive::commands::task::set_status(&root, &id, new_status, format)
            }
            TaskAction::Done { id } => hive::commands::task::done(&root, &id, format),
            TaskAction::Complete {
                id,
                session,
                role,
                summary,
                no_backup,
                no_sync,
            } => {
                let role = require_role(role)?;
                hive::commands::complete::run(
                    &root,
                    &id,
                    &session,
                    &role,
                    &summary,
                    hive::commands::complete::CompleteOptions {
                        backup: !no_backup,
                        sync: !no_sync,
                    },
                    format,
                )
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        let exit = e.exit_code();
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(exit);
    }
}
