//! Repository for catalog entries

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Row};

use repolink_core::catalog::{CatalogRepository, CatalogStore};

use crate::{Database, Error, Result};

/// Fields for a new catalog entry
#[derive(Debug, Clone)]
pub struct NewRepository {
    /// `owner/repo` name
    pub full_name: String,
    /// Canonical web URL
    pub html_url: String,
    /// URL to clone from
    pub clone_url: String,
}

/// Repository for managing catalog entries
pub struct RepositoryStore<'db> {
    db: &'db Database,
}

impl<'db> RepositoryStore<'db> {
    /// Create a new repository instance
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Insert a catalog entry, updating URLs if the name already exists
    ///
    /// Returns the entry's id.
    pub fn upsert(&self, new: &NewRepository) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO repositories (full_name, html_url, clone_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(full_name) DO UPDATE SET
                html_url = excluded.html_url,
                clone_url = excluded.clone_url,
                updated_at = excluded.updated_at",
            params![new.full_name, new.html_url, new.clone_url, now],
        )?;

        conn.query_row(
            "SELECT id FROM repositories WHERE full_name = ?1",
            params![new.full_name],
            |row| row.get(0),
        )
        .map_err(Error::Sqlite)
    }

    /// Find a catalog entry by its `owner/repo` name
    pub fn find_by_full_name(&self, full_name: &str) -> Result<Option<CatalogRepository>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, full_name, html_url, clone_url, local_path
             FROM repositories
             WHERE full_name = ?1 COLLATE NOCASE",
        )?;

        let mut rows = stmt.query(params![full_name])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::map_row(row)?)),
            None => Ok(None),
        }
    }

    /// List all catalog entries for an owner, in insertion order
    pub fn list_by_owner(&self, owner: &str) -> Result<Vec<CatalogRepository>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, full_name, html_url, clone_url, local_path
             FROM repositories
             WHERE instr(full_name, '/') > 0
               AND substr(full_name, 1, instr(full_name, '/') - 1) = ?1 COLLATE NOCASE
             ORDER BY id",
        )?;

        let mut rows = stmt.query(params![owner])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(Self::map_row(row)?);
        }

        Ok(entries)
    }

    /// Set or clear the linked local path for an entry
    pub fn set_local_path(&self, id: i64, path: Option<&Path>) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db.connection();

        let affected = conn.execute(
            "UPDATE repositories SET local_path = ?1, updated_at = ?2 WHERE id = ?3",
            params![path.map(|p| p.to_string_lossy().into_owned()), now, id],
        )?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Catalog entry with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Read the linked local path for an entry
    pub fn get_local_path(&self, id: i64) -> Result<Option<PathBuf>> {
        let conn = self.db.connection();
        conn.query_row(
            "SELECT local_path FROM repositories WHERE id = ?1",
            params![id],
            |row| row.get::<_, Option<String>>(0),
        )
        .map(|path| path.map(PathBuf::from))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("Catalog entry with id {} not found", id))
            }
            _ => Error::Sqlite(e),
        })
    }

    /// Convert a database row to a catalog entry
    fn map_row(row: &Row) -> Result<CatalogRepository> {
        let local_path: Option<String> = row.get(4)?;
        Ok(CatalogRepository {
            id: row.get(0)?,
            full_name: row.get(1)?,
            html_url: row.get(2)?,
            clone_url: row.get(3)?,
            local_path: local_path.map(PathBuf::from),
        })
    }
}

#[async_trait]
impl CatalogStore for Database {
    async fn list_repositories(&self, owner: &str) -> repolink_core::Result<Vec<CatalogRepository>> {
        RepositoryStore::new(self)
            .list_by_owner(owner)
            .map_err(|e| repolink_core::Error::Catalog(e.to_string()))
    }

    async fn set_local_path(&self, id: i64, path: Option<&Path>) -> repolink_core::Result<()> {
        RepositoryStore::new(self)
            .set_local_path(id, path)
            .map_err(|e| repolink_core::Error::Catalog(e.to_string()))
    }

    async fn get_local_path(&self, id: i64) -> repolink_core::Result<Option<PathBuf>> {
        RepositoryStore::new(self)
            .get_local_path(id)
            .map_err(|e| repolink_core::Error::Catalog(e.to_string()))
    }
}
