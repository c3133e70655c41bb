//! Scan-and-link orchestration

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::CatalogStore;
use crate::git::{read_origin_url, GIT_DIR_NAME};
use crate::link::cleanup_invalid_links;
use crate::remote_url::remote_urls_match;
use crate::{Error, Result};

/// Outcome of one scan-and-link run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Working-copy candidates found under the root
    pub scanned: usize,
    /// Links persisted during this run
    pub linked: usize,
    /// Stale links cleared by the cleanup pre-pass
    pub cleared: usize,
}

/// Walk `root` for git working copies and link each one to the first
/// matching catalog entry for `owner`.
///
/// Stale links are cleaned up first so they never shadow a fresh match. A
/// missing root folder is a no-op, not a failure. Directories without a
/// readable origin or without a catalog match are skipped. Idempotent and
/// safe to re-run; an entry already linked to a still-valid path is never
/// re-linked to a different one. Infrastructure failures abort the scan, but
/// links persisted up to that point remain.
pub async fn scan_and_link(
    store: &dyn CatalogStore,
    root: &Path,
    owner: &str,
) -> Result<ScanSummary> {
    if !root.is_dir() {
        info!(root = %root.display(), owner, "Scan root does not exist, nothing to link");
        return Ok(ScanSummary::default());
    }

    let cleared = cleanup_invalid_links(store, owner).await?;

    let repositories = store.list_repositories(owner).await?;
    let mut summary = ScanSummary {
        cleared,
        ..Default::default()
    };

    // Entries given a path during this run; the first directory to match an
    // entry wins, in traversal order.
    let mut claimed: HashSet<i64> = HashSet::new();

    for dir_entry in WalkDir::new(root).min_depth(1) {
        let dir_entry = dir_entry.map_err(|e| {
            Error::Other(format!("Scan failed under {}: {}", root.display(), e))
        })?;

        if !dir_entry.file_type().is_dir() || dir_entry.file_name() != GIT_DIR_NAME {
            continue;
        }
        let Some(copy_root) = dir_entry.path().parent() else {
            continue;
        };
        summary.scanned += 1;

        let Some(origin) = read_origin_url(copy_root) else {
            debug!(path = %copy_root.display(), "Skipping working copy without readable origin");
            continue;
        };

        let matched = repositories.iter().find(|repository| {
            if claimed.contains(&repository.id) {
                return false;
            }
            // Keep an existing still-valid link rather than moving it
            if let Some(existing) = &repository.local_path {
                if existing.as_path() != copy_root {
                    return false;
                }
            }
            remote_urls_match(&repository.html_url, &origin)
        });

        match matched {
            Some(repository) => {
                store.set_local_path(repository.id, Some(copy_root)).await?;
                claimed.insert(repository.id);
                summary.linked += 1;
                info!(
                    repo = %repository.full_name,
                    path = %copy_root.display(),
                    "Linked working copy"
                );
            }
            None => {
                debug!(path = %copy_root.display(), origin = %origin, "No catalog entry matches origin");
            }
        }
    }

    info!(
        owner,
        scanned = summary.scanned,
        linked = summary.linked,
        cleared = summary.cleared,
        "Scan complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::catalog::InMemoryCatalog;
    use crate::link::testing::{entry, working_copy};

    #[tokio::test]
    async fn test_scan_links_matching_copy() {
        let work = TempDir::new().unwrap();
        let widgets = work.path().join("widgets");
        std::fs::create_dir(&widgets).unwrap();
        working_copy(&widgets, Some("git@github.com:acme/widgets.git"));

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        let summary = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        assert_eq!(summary.linked, 1);
        assert_eq!(
            catalog.get_local_path(1).await.unwrap(),
            Some(widgets.clone())
        );
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_noop() {
        let work = TempDir::new().unwrap();
        let missing = work.path().join("missing");

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        let summary = scan_and_link(&catalog, &missing, "acme").await.unwrap();
        assert_eq!(summary, ScanSummary::default());
    }

    #[tokio::test]
    async fn test_scan_finds_nested_copies() {
        let work = TempDir::new().unwrap();
        let nested = work.path().join("team").join("widgets");
        std::fs::create_dir_all(&nested).unwrap();
        working_copy(&nested, Some("https://github.com/acme/widgets.git"));

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        let summary = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        assert_eq!(summary.linked, 1);
        assert_eq!(catalog.get_local_path(1).await.unwrap(), Some(nested));
    }

    #[tokio::test]
    async fn test_scan_skips_unmatched_and_originless() {
        let work = TempDir::new().unwrap();

        let unmatched = work.path().join("unmatched");
        std::fs::create_dir(&unmatched).unwrap();
        working_copy(&unmatched, Some("git@github.com:elsewhere/unrelated.git"));

        let originless = work.path().join("originless");
        std::fs::create_dir(&originless).unwrap();
        working_copy(&originless, None);

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        let summary = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.linked, 0);
        assert_eq!(catalog.get_local_path(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scan_is_idempotent() {
        let work = TempDir::new().unwrap();
        let widgets = work.path().join("widgets");
        std::fs::create_dir(&widgets).unwrap();
        working_copy(&widgets, Some("git@github.com:acme/widgets.git"));

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));

        let first = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        let second = scan_and_link(&catalog, work.path(), "acme").await.unwrap();

        assert_eq!(first.linked, second.linked);
        assert_eq!(second.cleared, 0);
        assert_eq!(catalog.get_local_path(1).await.unwrap(), Some(widgets));
    }

    #[tokio::test]
    async fn test_scan_cleans_stale_link_first() {
        let work = TempDir::new().unwrap();
        let widgets = work.path().join("widgets");
        std::fs::create_dir(&widgets).unwrap();
        working_copy(&widgets, Some("git@github.com:acme/widgets.git"));

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));
        // Stale link pointing at a directory that no longer exists
        catalog
            .set_local_path(1, Some(&work.path().join("old-widgets")))
            .await
            .unwrap();

        let summary = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.linked, 1);
        assert_eq!(catalog.get_local_path(1).await.unwrap(), Some(widgets));
    }

    #[tokio::test]
    async fn test_first_match_wins_for_duplicate_entries() {
        // Two entries whose URLs differ only by scheme and .git suffix both
        // match the same working copy; only the first gets the link.
        let work = TempDir::new().unwrap();
        let widgets = work.path().join("widgets");
        std::fs::create_dir(&widgets).unwrap();
        working_copy(&widgets, Some("git@github.com:acme/widgets.git"));

        let catalog = InMemoryCatalog::new();
        let mut first = entry(1, "acme/widgets");
        first.html_url = "https://github.com/acme/widgets.git".to_string();
        catalog.insert(first);
        let mut second = entry(2, "acme/widgets");
        second.html_url = "ssh://git@github.com/acme/widgets".to_string();
        catalog.insert(second);

        let summary = scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        assert_eq!(summary.linked, 1);
        assert_eq!(catalog.get_local_path(1).await.unwrap(), Some(widgets));
        assert_eq!(catalog.get_local_path(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_existing_valid_link_not_moved() {
        let work = TempDir::new().unwrap();
        let first_copy = work.path().join("widgets");
        let second_copy = work.path().join("widgets-again");
        for dir in [&first_copy, &second_copy] {
            std::fs::create_dir(dir).unwrap();
            working_copy(dir, Some("git@github.com:acme/widgets.git"));
        }

        let catalog = InMemoryCatalog::new();
        catalog.insert(entry(1, "acme/widgets"));
        catalog.set_local_path(1, Some(&second_copy)).await.unwrap();

        scan_and_link(&catalog, work.path(), "acme").await.unwrap();
        // The valid pre-existing link survives even though another matching
        // copy is encountered first in traversal order.
        assert_eq!(catalog.get_local_path(1).await.unwrap(), Some(second_copy));
    }
}
