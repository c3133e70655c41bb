//! Database connection and initialization

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, Result};

/// Database handle
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database at the default location
    ///
    /// Location: `~/.local/share/repolink/catalog.db`
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(&path)
    }

    /// Open or create the database at a specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::InvalidData(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database for testing
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join("repolink").join("catalog.db"))
            .ok_or_else(|| Error::InvalidData("Failed to determine data directory".to_string()))
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let conn = self.connection();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS repositories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL UNIQUE,
                html_url TEXT NOT NULL,
                clone_url TEXT NOT NULL,
                local_path TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_repositories_full_name
             ON repositories(full_name)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_repositories_local_path
             ON repositories(local_path)",
            [],
        )?;

        Ok(())
    }

    /// Lock and return the underlying connection
    pub(crate) fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_database() {
        let db = Database::in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_open_at_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("catalog.db");
        let _db = Database::open_at(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_schema_initialization() {
        let db = Database::in_memory().unwrap();

        let count: i32 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='repositories'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 1);
    }
}
