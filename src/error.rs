use thiserror::Error;

#[derive(Debug, Error)]
pub enum HiveError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("store busy: {0} (another writer holds the lock)")]
    StoreBusy(String),

    #[error("agent '{0}' not registered")]
    AgentNotFound(String),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("session {0} not found")]
    SessionNotFound(String),

    #[error("message {0} not found")]
    MessageNotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl HiveError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::StoreBusy(_) => "store_busy",
            Self::AgentNotFound(_) => "agent_not_found",
            Self::TaskNotFound(_) => "task_not_found",
            Self::SessionNotFound(_) => "session_not_found",
            Self::MessageNotFound(_) => "message_not_found",
            Self::Validation(_) => "validation",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Db(_) => "db_error",
        }
    }

    /// Process exit code for the CLI. Usage errors exit 2 via clap before
    /// any of these are reached.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::AgentNotFound(_)
            | Self::TaskNotFound(_)
            | Self::SessionNotFound(_)
            | Self::MessageNotFound(_) => 3,
            Self::StoreUnavailable(_) | Self::StoreBusy(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HiveError>;
