//! Stale link detection and repair

use tracing::{debug, warn};

use crate::catalog::CatalogStore;
use crate::git::{is_working_copy, read_origin_url};
use crate::remote_url::remote_urls_match;
use crate::Result;

/// Re-validate every persisted link for an owner and clear the invalid ones.
///
/// A link is cleared when its directory is gone, is no longer a git working
/// copy, its origin remote cannot be read, or the origin no longer matches
/// the entry's web URL. An unreadable origin may be transient but is treated
/// as stale; the next scan restores the link if the copy recovers.
///
/// Returns the number of links cleared. Clears already persisted survive a
/// later failure.
pub async fn cleanup_invalid_links(store: &dyn CatalogStore, owner: &str) -> Result<usize> {
    let repositories = store.list_repositories(owner).await?;

    let mut cleared = 0;
    for repository in &repositories {
        let Some(path) = &repository.local_path else {
            continue;
        };

        let stale_reason = if !path.is_dir() {
            warn!(repo = %repository.full_name, path = %path.display(), "Linked directory is missing");
            Some("directory missing")
        } else if !is_working_copy(path) {
            warn!(repo = %repository.full_name, path = %path.display(), "Linked directory is not a git working copy");
            Some("not a working copy")
        } else {
            match read_origin_url(path) {
                None => {
                    warn!(repo = %repository.full_name, path = %path.display(), "Could not read origin remote, assuming stale");
                    Some("origin unreadable")
                }
                Some(origin) if !remote_urls_match(&repository.html_url, &origin) => {
                    warn!(
                        repo = %repository.full_name,
                        path = %path.display(),
                        origin = %origin,
                        "Origin remote no longer matches catalog entry"
                    );
                    Some("origin diverged")
                }
                Some(_) => None,
            }
        };

        if let Some(reason) = stale_reason {
            store.set_local_path(repository.id, None).await?;
            cleared += 1;
            debug!(repo = %repository.full_name, reason, "Cleared link");
        }
    }

    Ok(cleared)
}
