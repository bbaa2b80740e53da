use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::error::{HiveError, Result};
use crate::ids::{agent_id_for_role, new_message_id, new_session_id, new_task_id};
use crate::model::{
    ActivityEntry, Agent, AgentStatus, DEFAULT_MESSAGE_TYPE, Message, Priority, Session,
    SessionStatus, Task, TaskStatus,
};
use crate::store::workspace;

// ---------------------------------------------------------------------------
// Helpers: RFC 3339 timestamps in SQLite TEXT columns
// ---------------------------------------------------------------------------

fn parse_dt(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_dt_opt(s: Option<String>) -> Option<DateTime<Utc>> {
    s.map(|v| parse_dt(&v))
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::DatabaseBusy || e.code == ErrorCode::DatabaseLocked
    )
}

const OPEN_RETRIES: u32 = 5;
const OPEN_BACKOFF_MS: u64 = 50;

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The shared coordination store: one SQLite file holding agents, sessions,
/// messages, tasks, and the activity log. Every public method is one short
/// synchronous transaction; concurrent CLI invocations are serialized by
/// SQLite's file locking plus the busy timeout set on open.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open (or create) the ledger at the given file path, with bounded
    /// retry/backoff when another writer holds the lock.
    pub fn open(path: &Path) -> Result<Self> {
        let mut attempt = 0;
        let conn = loop {
            match Connection::open(path) {
                Ok(conn) => break conn,
                Err(e) if is_busy(&e) && attempt < OPEN_RETRIES => {
                    attempt += 1;
                    std::thread::sleep(Duration::from_millis(OPEN_BACKOFF_MS * attempt as u64));
                }
                Err(e) if is_busy(&e) => {
                    return Err(HiveError::StoreBusy(path.display().to_string()));
                }
                Err(e) => {
                    return Err(HiveError::StoreUnavailable(format!(
                        "{}: {e}",
                        path.display()
                    )));
                }
            }
        };
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;\
             PRAGMA busy_timeout=5000;",
        )?;
        let ledger = Self { conn };
        ledger.create_tables()?;
        Ok(ledger)
    }

    /// Open an in-memory ledger (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA busy_timeout=5000;")?;
        let ledger = Self { conn };
        ledger.create_tables()?;
        Ok(ledger)
    }

    /// Convenience: open `<root>/.agents/project_kb.db`, creating the
    /// coordination directory if needed.
    pub fn from_workspace(root: &Path) -> Result<Self> {
        let dir = workspace::agents_dir(root);
        fs::create_dir_all(&dir)?;
        Self::open(&workspace::db_path(root))
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS agents (
                agent_id TEXT PRIMARY KEY,
                role TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                focus TEXT,
                working_on TEXT,
                session_start TEXT NOT NULL,
                last_heartbeat TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                agent_id TEXT NOT NULL,
                role TEXT NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                summary TEXT
            );

            CREATE TABLE IF NOT EXISTS messages (
                message_id TEXT PRIMARY KEY,
                from_agent TEXT NOT NULL,
                to_agent TEXT,
                subject TEXT NOT NULL,
                content TEXT NOT NULL,
                message_type TEXT NOT NULL DEFAULT 'notification',
                is_read INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_messages_to_read
                ON messages(to_agent, is_read);

            CREATE TABLE IF NOT EXISTS tasks (
                task_id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'open',
                priority TEXT NOT NULL DEFAULT 'medium',
                assigned_to TEXT,
                created_by TEXT,
                created_at TEXT NOT NULL,
                completed_at TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_tasks_status
                ON tasks(status);

            CREATE TABLE IF NOT EXISTS activity_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                agent_id TEXT NOT NULL,
                action TEXT NOT NULL,
                details TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_activity_session
                ON activity_log(session_id);",
        )?;
        Ok(())
    }

    /// Expose the raw connection (for tests or advanced usage).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Register (or re-register) an agent. Idempotent upsert: an existing
    /// row is reactivated with fresh focus and timestamps; `working_on` is
    /// preserved across re-registration. Broadcasts a join announcement in
    /// the same transaction.
    pub fn register(&self, role: &str, focus: Option<&str>) -> Result<Agent> {
        let role = role.trim();
        if role.is_empty() {
            return Err(HiveError::Validation("role must be non-empty".into()));
        }
        let agent_id = agent_id_for_role(role);
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO agents (agent_id, role, status, focus, working_on, session_start, last_heartbeat)
             VALUES (?1, ?2, 'active', ?3, NULL, ?4, ?4)
             ON CONFLICT(agent_id) DO UPDATE SET
                role = ?2,
                status = 'active',
                focus = ?3,
                session_start = ?4,
                last_heartbeat = ?4",
            params![&agent_id, role, focus, &now],
        )?;
        insert_message(
            &tx,
            &agent_id,
            None,
            &format!("Agent Joined: {agent_id}"),
            &match focus {
                Some(f) => format!("{agent_id} is online (focus: {f})"),
                None => format!("{agent_id} is online"),
            },
            DEFAULT_MESSAGE_TYPE,
        )?;
        tx.commit()?;

        self.get_agent(role)
    }

    /// List agents, active-only by default.
    pub fn list_agents(&self, include_inactive: bool) -> Result<Vec<Agent>> {
        let sql = if include_inactive {
            "SELECT agent_id, role, status, focus, working_on, session_start, last_heartbeat
             FROM agents"
        } else {
            "SELECT agent_id, role, status, focus, working_on, session_start, last_heartbeat
             FROM agents WHERE status = 'active'"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], agent_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Get a single agent by role (or agent id).
    pub fn get_agent(&self, role: &str) -> Result<Agent> {
        let agent_id = agent_id_for_role(role);
        let mut stmt = self.conn.prepare(
            "SELECT agent_id, role, status, focus, working_on, session_start, last_heartbeat
             FROM agents WHERE agent_id = ?1",
        )?;
        stmt.query_row(params![&agent_id], agent_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => HiveError::AgentNotFound(agent_id),
                other => HiveError::Db(other),
            })
    }

    /// Update what an agent is working on and refresh its heartbeat.
    pub fn update_status(&self, role: &str, working_on: Option<&str>) -> Result<()> {
        let agent_id = agent_id_for_role(role);
        let now = Utc::now().to_rfc3339();
        let changes = self.conn.execute(
            "UPDATE agents SET working_on = ?2, last_heartbeat = ?3 WHERE agent_id = ?1",
            params![&agent_id, working_on, &now],
        )?;
        if changes == 0 {
            return Err(HiveError::AgentNotFound(agent_id));
        }
        Ok(())
    }

    /// Deactivate an agent (soft delete; the row is kept). A summary, when
    /// given, is broadcast so the rest of the crew sees the handoff.
    pub fn leave(&self, role: &str, summary: Option<&str>) -> Result<()> {
        let agent_id = agent_id_for_role(role);
        let tx = self.conn.unchecked_transaction()?;
        let changes = tx.execute(
            "UPDATE agents SET status = 'inactive' WHERE agent_id = ?1",
            params![&agent_id],
        )?;
        if changes == 0 {
            return Err(HiveError::AgentNotFound(agent_id));
        }
        if let Some(summary) = summary {
            insert_message(
                &tx,
                &agent_id,
                None,
                &format!("Agent Left: {agent_id}"),
                summary,
                DEFAULT_MESSAGE_TYPE,
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Messenger
    // -----------------------------------------------------------------------

    /// Send a message. `to = None` is a broadcast: one row visible to every
    /// lister, never fanned out per recipient. Recipients are not validated.
    pub fn send_message(
        &self,
        from: &str,
        to: Option<&str>,
        subject: &str,
        content: &str,
        message_type: Option<&str>,
    ) -> Result<Message> {
        let tx = self.conn.unchecked_transaction()?;
        let id = insert_message(
            &tx,
            from,
            to,
            subject,
            content,
            message_type.unwrap_or(DEFAULT_MESSAGE_TYPE),
        )?;
        tx.commit()?;
        self.get_message(&id)
    }

    /// List messages, most recent first, with explicit pagination. No
    /// per-recipient filtering happens here: broadcasts and directed
    /// messages alike are visible to any lister.
    pub fn list_messages(
        &self,
        unread_only: bool,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Vec<Message>> {
        let sql = if unread_only {
            "SELECT message_id, from_agent, to_agent, subject, content, message_type, is_read, created_at
             FROM messages WHERE is_read = 0
             ORDER BY created_at DESC, message_id LIMIT ?1 OFFSET ?2"
        } else {
            "SELECT message_id, from_agent, to_agent, subject, content, message_type, is_read, created_at
             FROM messages
             ORDER BY created_at DESC, message_id LIMIT ?1 OFFSET ?2"
        };
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![limit, offset as i64], message_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    fn get_message(&self, id: &str) -> Result<Message> {
        let mut stmt = self.conn.prepare(
            "SELECT message_id, from_agent, to_agent, subject, content, message_type, is_read, created_at
             FROM messages WHERE message_id = ?1",
        )?;
        stmt.query_row(params![id], message_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => HiveError::MessageNotFound(id.to_string()),
                other => HiveError::Db(other),
            })
    }

    /// Mark a message read and return it. The flag only ever flips
    /// false -> true; reading twice is a no-op on the row.
    pub fn read_message(&self, id: &str) -> Result<Message> {
        let changes = self.conn.execute(
            "UPDATE messages SET is_read = 1 WHERE message_id = ?1",
            params![id],
        )?;
        if changes == 0 {
            return Err(HiveError::MessageNotFound(id.to_string()));
        }
        self.get_message(id)
    }

    // -----------------------------------------------------------------------
    // Task ledger
    // -----------------------------------------------------------------------

    /// Create a task (status `open`). When an assignee is given, a
    /// notification message is sent to them in the same transaction.
    pub fn add_task(
        &self,
        title: &str,
        assigned_to: Option<&str>,
        priority: Priority,
        description: Option<&str>,
        created_by: Option<&str>,
    ) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HiveError::Validation("title must be non-empty".into()));
        }
        let creator_role = created_by.unwrap_or("");
        let task_id = new_task_id(if creator_role.is_empty() {
            assigned_to.unwrap_or("")
        } else {
            creator_role
        });
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO tasks (task_id, title, description, status, priority, assigned_to, created_by, created_at, completed_at)
             VALUES (?1, ?2, ?3, 'open', ?4, ?5, ?6, ?7, NULL)",
            params![
                &task_id,
                title,
                description,
                priority.to_string(),
                assigned_to,
                created_by,
                &now
            ],
        )?;
        if let Some(assignee) = assigned_to {
            insert_message(
                &tx,
                created_by.unwrap_or("SYSTEM"),
                Some(assignee),
                &format!("New Task Assigned: {title}"),
                &format!("Task {task_id} ({priority} priority) has been assigned to you"),
                DEFAULT_MESSAGE_TYPE,
            )?;
        }
        tx.commit()?;
        self.get_task(&task_id)
    }

    /// List tasks, most recent first. Both filters are optional and combine
    /// with AND semantics.
    pub fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        assigned_to: Option<&str>,
    ) -> Result<Vec<Task>> {
        let mut sql = String::from(
            "SELECT task_id, title, description, status, priority, assigned_to, created_by, created_at, completed_at
             FROM tasks",
        );
        let mut conditions = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        if let Some(s) = status {
            conditions.push(format!("status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(s.to_string()));
        }
        if let Some(a) = assigned_to {
            conditions.push(format!("assigned_to = ?{}", param_values.len() + 1));
            param_values.push(Box::new(a.to_string()));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, task_id");

        let params_slice: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_slice.as_slice(), task_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Get a single task by id.
    pub fn get_task(&self, task_id: &str) -> Result<Task> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, title, description, status, priority, assigned_to, created_by, created_at, completed_at
             FROM tasks WHERE task_id = ?1",
        )?;
        stmt.query_row(params![task_id], task_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    HiveError::TaskNotFound(task_id.to_string())
                }
                other => HiveError::Db(other),
            })
    }

    /// Reassign a task and notify the new assignee.
    pub fn assign_task(&self, task_id: &str, assigned_to: &str, from: Option<&str>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changes = tx.execute(
            "UPDATE tasks SET assigned_to = ?2 WHERE task_id = ?1",
            params![task_id, assigned_to],
        )?;
        if changes == 0 {
            return Err(HiveError::TaskNotFound(task_id.to_string()));
        }
        insert_message(
            &tx,
            from.unwrap_or("SYSTEM"),
            Some(assigned_to),
            &format!("Task Assigned: {task_id}"),
            &format!("Task {task_id} has been assigned to you"),
            DEFAULT_MESSAGE_TYPE,
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Unconditional status transition; any status may follow any other.
    /// Maintains the invariant that `completed_at` is set iff the status
    /// is `done`.
    pub fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        let completed_at = if status == TaskStatus::Done {
            Some(Utc::now().to_rfc3339())
        } else {
            None
        };
        let changes = self.conn.execute(
            "UPDATE tasks SET status = ?2, completed_at = ?3 WHERE task_id = ?1",
            params![task_id, status.to_string(), completed_at],
        )?;
        if changes == 0 {
            return Err(HiveError::TaskNotFound(task_id.to_string()));
        }
        self.get_task(task_id)
    }

    // -----------------------------------------------------------------------
    // Session recorder
    // -----------------------------------------------------------------------

    /// Start a new active session for a role.
    pub fn start_session(&self, role: &str) -> Result<Session> {
        let role = role.trim();
        if role.is_empty() {
            return Err(HiveError::Validation("role must be non-empty".into()));
        }
        let session_id = new_session_id(role);
        let agent_id = agent_id_for_role(role);
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO sessions (session_id, agent_id, role, started_at, ended_at, status, summary)
             VALUES (?1, ?2, ?3, ?4, NULL, 'active', NULL)",
            params![&session_id, &agent_id, role, &now],
        )?;
        self.get_session(&session_id)
    }

    /// Append to the activity log. The session is not required to exist or
    /// be active; when it does exist its agent id is recorded, otherwise
    /// the entry is attributed to `unknown`.
    pub fn log_activity(
        &self,
        session_id: &str,
        action: &str,
        details: Option<&str>,
    ) -> Result<ActivityEntry> {
        let agent_id: Option<String> = self
            .conn
            .query_row(
                "SELECT agent_id FROM sessions WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )
            .optional()?;
        let agent_id = agent_id.unwrap_or_else(|| "unknown".to_string());
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO activity_log (session_id, agent_id, action, details, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![session_id, &agent_id, action, details, &now],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(ActivityEntry {
            id,
            session_id: session_id.to_string(),
            agent_id,
            action: action.to_string(),
            details: details.map(|s| s.to_string()),
            created_at: parse_dt(&now),
        })
    }

    /// End a session: one-way `active` -> `completed`, no re-opening.
    pub fn end_session(&self, session_id: &str, summary: Option<&str>) -> Result<Session> {
        let now = Utc::now().to_rfc3339();
        let changes = self.conn.execute(
            "UPDATE sessions SET ended_at = ?2, status = 'completed', summary = ?3
             WHERE session_id = ?1",
            params![session_id, &now, summary],
        )?;
        if changes == 0 {
            return Err(HiveError::SessionNotFound(session_id.to_string()));
        }
        self.get_session(session_id)
    }

    /// List sessions, most recent first, optionally filtered by agent.
    pub fn list_sessions(&self, agent: Option<&str>) -> Result<Vec<Session>> {
        let rows = match agent {
            Some(role) => {
                let agent_id = agent_id_for_role(role);
                let mut stmt = self.conn.prepare(
                    "SELECT session_id, agent_id, role, started_at, ended_at, status, summary
                     FROM sessions WHERE agent_id = ?1
                     ORDER BY started_at DESC, session_id",
                )?;
                let rows = stmt.query_map(params![&agent_id], session_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT session_id, agent_id, role, started_at, ended_at, status, summary
                     FROM sessions ORDER BY started_at DESC, session_id",
                )?;
                let rows = stmt.query_map([], session_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    /// Get a single session by id.
    pub fn get_session(&self, session_id: &str) -> Result<Session> {
        let mut stmt = self.conn.prepare(
            "SELECT session_id, agent_id, role, started_at, ended_at, status, summary
             FROM sessions WHERE session_id = ?1",
        )?;
        stmt.query_row(params![session_id], session_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    HiveError::SessionNotFound(session_id.to_string())
                }
                other => HiveError::Db(other),
            })
    }

    /// Activity entries for one session, in append order.
    pub fn session_activity(&self, session_id: &str) -> Result<Vec<ActivityEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, agent_id, action, details, created_at
             FROM activity_log WHERE session_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![session_id], |row| {
            Ok(ActivityEntry {
                id: row.get(0)?,
                session_id: row.get(1)?,
                agent_id: row.get(2)?,
                action: row.get(3)?,
                details: row.get(4)?,
                created_at: parse_dt(&row.get::<_, String>(5)?),
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn agent_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Agent> {
    let status: String = row.get(2)?;
    Ok(Agent {
        agent_id: row.get(0)?,
        role: row.get(1)?,
        status: if status == "inactive" {
            AgentStatus::Inactive
        } else {
            AgentStatus::Active
        },
        focus: row.get(3)?,
        working_on: row.get(4)?,
        session_start: parse_dt(&row.get::<_, String>(5)?),
        last_heartbeat: parse_dt(&row.get::<_, String>(6)?),
    })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        from_agent: row.get(1)?,
        to_agent: row.get(2)?,
        subject: row.get(3)?,
        content: row.get(4)?,
        message_type: row.get(5)?,
        is_read: row.get::<_, i64>(6)? != 0,
        created_at: parse_dt(&row.get::<_, String>(7)?),
    })
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let status: String = row.get(3)?;
    let priority: String = row.get(4)?;
    Ok(Task {
        task_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: TaskStatus::parse(&status).unwrap_or_default(),
        priority: match priority.as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        },
        assigned_to: row.get(5)?,
        created_by: row.get(6)?,
        created_at: parse_dt(&row.get::<_, String>(7)?),
        completed_at: parse_dt_opt(row.get(8)?),
    })
}

fn session_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Session> {
    let status: String = row.get(5)?;
    Ok(Session {
        session_id: row.get(0)?,
        agent_id: row.get(1)?,
        role: row.get(2)?,
        started_at: parse_dt(&row.get::<_, String>(3)?),
        ended_at: parse_dt_opt(row.get(4)?),
        status: if status == "completed" {
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        },
        summary: row.get(6)?,
    })
}

fn insert_message(
    tx: &rusqlite::Connection,
    from: &str,
    to: Option<&str>,
    subject: &str,
    content: &str,
    message_type: &str,
) -> Result<String> {
    let id = new_message_id();
    let now = Utc::now().to_rfc3339();
    tx.execute(
        "INSERT INTO messages (message_id, from_agent, to_agent, subject, content, message_type, is_read, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![&id, from, to, subject, content, message_type, &now],
    )?;
    Ok(id)
}

// ===========================================================================
// Tests
// ===========================================================================
