use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the coordination directory at the workspace root.
pub const AGENTS_DIR: &str = ".agents";

/// Store file name inside the coordination directory.
pub const DB_FILE: &str = "project_kb.db";

/// Find the workspace root by walking up from `start` looking for an
/// existing `.agents/` directory. Falls back to `start` itself: the store
/// is created on first use, so a fresh workspace is not an error.
pub fn find_workspace_root_from(start: &Path) -> PathBuf {
    let mut dir = start;
    loop {
        if dir.join(AGENTS_DIR).is_dir() {
            return dir.to_path_buf();
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return start.to_path_buf(),
        }
    }
}

/// Workspace root for the current process.
pub fn find_workspace_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(find_workspace_root_from(&cwd))
}

pub fn agents_dir(root: &Path) -> PathBuf {
    root.join(AGENTS_DIR)
}

pub fn db_path(root: &Path) -> PathBuf {
    agents_dir(root).join(DB_FILE)
}

/// Directory holding completion-report artifacts. Created on demand.
pub fn sessions_dir(root: &Path) -> Result<PathBuf> {
    let dir = agents_dir(root).join("sessions");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Directory holding best-effort store backups. Created on demand.
pub fn backups_dir(root: &Path) -> Result<PathBuf> {
    let dir = agents_dir(root).join("backups");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
