//! Clone provisioning

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::CatalogStore;
use crate::git::{clone_repository, is_working_copy, CloneCredentials};
use crate::Result;

/// Clone a catalog repository into `root/repo_name` and persist the link.
///
/// If the target directory already holds a valid working copy it is adopted
/// as the link without a network clone. If it exists but is not a working
/// copy, nothing is modified and `None` is returned; the ambiguous state is
/// left for manual resolution. Clone failures (network, auth, disk) are
/// logged and return `None`; only catalog-store failures propagate as
/// errors.
pub async fn provision_clone(
    store: &dyn CatalogStore,
    root: &Path,
    repo_name: &str,
    repo_id: i64,
    clone_url: &str,
    credentials: &CloneCredentials,
) -> Result<Option<PathBuf>> {
    if !root.is_dir() {
        warn!(root = %root.display(), "Clone root folder does not exist");
        return Ok(None);
    }

    let target = root.join(repo_name);

    if target.exists() {
        if is_working_copy(&target) {
            info!(path = %target.display(), "Existing working copy found, adopting as link");
            store.set_local_path(repo_id, Some(&target)).await?;
            return Ok(Some(target));
        }
        warn!(
            path = %target.display(),
            "Target exists but is not a git working copy, leaving untouched"
        );
        return Ok(None);
    }

    match clone_repository(clone_url, &target, credentials) {
        Ok(path) => {
            info!(url = clone_url, path = %path.display(), "Cloned repository");
            store.set_local_path(repo_id, Some(&path)).await?;
            Ok(Some(path))
        }
        Err(e) => {
            warn!(url = clone_url, error = %e, "Clone failed");
            Ok(None)
        }
    }
}
