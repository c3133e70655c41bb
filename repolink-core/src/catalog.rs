//! Catalog model and store interface
//!
//! The catalog is the external store of known remote repositories. The core
//! never owns its persistence; it consumes the narrow [`CatalogStore`]
//! contract and only ever updates an entry's `local_path`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A remotely known repository tracked by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRepository {
    /// Stable numeric identifier, unique within the catalog
    pub id: i64,
    /// `owner/repo` name
    pub full_name: String,
    /// Canonical web URL
    pub html_url: String,
    /// URL to clone from
    pub clone_url: String,
    /// Absolute path of a linked working copy, if any
    pub local_path: Option<PathBuf>,
}

impl CatalogRepository {
    /// Repository name without the owner prefix
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.full_name)
    }

    /// Whether this entry belongs to the given owner (case-insensitive)
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.full_name
            .split_once('/')
            .is_some_and(|(o, _)| o.eq_ignore_ascii_case(owner))
    }
}

/// Read/write interface to the catalog store
///
/// Implementations are expected to be eventually consistent with the core's
/// own prior writes within one process.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List all catalog entries for an owner, in catalog iteration order
    async fn list_repositories(&self, owner: &str) -> Result<Vec<CatalogRepository>>;

    /// Set or clear the linked local path for an entry
    async fn set_local_path(&self, id: i64, path: Option<&Path>) -> Result<()>;

    /// Read the linked local path for an entry
    async fn get_local_path(&self, id: i64) -> Result<Option<PathBuf>>;
}

/// In-memory catalog store, used in tests and for embedding
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    repositories: Mutex<Vec<CatalogRepository>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the catalog
    pub fn insert(&self, repository: CatalogRepository) {
        self.repositories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(repository);
    }

    /// Fetch an entry by id
    pub fn get(&self, id: i64) -> Option<CatalogRepository> {
        self.repositories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<CatalogRepository>> {
        let repositories = self
            .repositories
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        Ok(repositories
            .iter()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn set_local_path(&self, id: i64, path: Option<&Path>) -> Result<()> {
        let mut repositories = self
            .repositories
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let entry = repositories
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::Catalog(format!("No catalog entry with id {}", id)))?;
        entry.local_path = path.map(Path::to_path_buf);
        Ok(())
    }

    async fn get_local_path(&self, id: i64) -> Result<Option<PathBuf>> {
        let repositories = self
            .repositories
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let entry = repositories
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::Catalog(format!("No catalog entry with id {}", id)))?;
        Ok(entry.local_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, full_name: &str) -> CatalogRepository {
        CatalogRepository {
            id,
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{}", full_name),
            clone_url: format!("https://github.com/{}.git", full_name),
            local_path: None,
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(entry(1, "acme/widgets").name(), "widgets");
    }

    #[test]
    fn test_is_owned_by_case_insensitive() {
        let repo = entry(1, "Acme/widgets");
        assert!(repo.is_owned_by("acme"));
        assert!(!repo.is_owned_by("other"));
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));
        catalog.insert(entry(2, "other/tools"));

        let repos = catalog.list_repositories("acme").await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "acme/widgets");
    }

    #[tokio::test]
    async fn test_set_and_get_local_path() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        catalog
            .set_local_path(1, Some(Path::new("/work/widgets")))
            .await
            .unwrap();
        assert_eq!(
            catalog.get_local_path(1).await.unwrap(),
            Some(PathBuf::from("/work/widgets"))
        );

        catalog.set_local_path(1, None).await.unwrap();
        assert_eq!(catalog.get_local_path(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_local_path_unknown_id() {
        let catalog = InMemoryCatalog::new();
        let result = catalog.set_local_path(42, None).await;
        assert!(result.is_err());
    }
}
