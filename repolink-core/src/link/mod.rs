//! Linking catalog entries to local working copies
//!
//! Three entry points share the link lifecycle: the scan orchestrator sets
//! links for discovered working copies, the cleanup engine clears links that
//! no longer verify, and the clone provisioner creates a working copy and
//! links it.

mod cleanup;
mod provision;
mod scan;

pub use cleanup::cleanup_invalid_links;
pub use provision::provision_clone;
pub use scan::{scan_and_link, ScanSummary};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use crate::catalog::CatalogRepository;

    /// Initialize a working copy with one commit and an optional origin remote
    pub fn working_copy(dir: &Path, origin_url: Option<&str>) {
        let repo = git2::Repository::init(dir).unwrap();
        std::fs::write(dir.join("README.md"), "hello").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        if let Some(url) = origin_url {
            repo.remote("origin", url).unwrap();
        }
    }

    /// Catalog entry for `owner/name` with GitHub-shaped URLs
    pub fn entry(id: i64, full_name: &str) -> CatalogRepository {
        CatalogRepository {
            id,
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{}", full_name),
            clone_url: format!("https://github.com/{}.git", full_name),
            local_path: None,
        }
    }
}
