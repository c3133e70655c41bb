//! Git working-copy detection and origin reading

use std::path::Path;

use git2::Repository;
use tracing::debug;

/// Name of the git metadata directory inside a working copy
pub const GIT_DIR_NAME: &str = ".git";

/// Check whether the given path is the root of a valid git working copy
pub fn is_working_copy(path: impl AsRef<Path>) -> bool {
    Repository::open(path.as_ref()).is_ok()
}

/// Read the `origin` remote URL of the working copy at the given path.
///
/// Fails soft: returns `None` when the path is not a git working copy, no
/// `origin` remote is configured, or the remote has no URL. All three cases
/// are logged and treated identically by callers.
pub fn read_origin_url(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();

    let repo = match Repository::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Not a git working copy");
            return None;
        }
    };

    let remote = match repo.find_remote("origin") {
        Ok(remote) => remote,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No origin remote configured");
            return None;
        }
    };

    match remote.url() {
        Some(url) => Some(url.to_string()),
        None => {
            debug!(path = %path.display(), "Origin remote has no URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_working_copy_negative() {
        let dir = TempDir::new().unwrap();
        assert!(!is_working_copy(dir.path()));
    }

    #[test]
    fn test_is_working_copy_positive() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        assert!(is_working_copy(dir.path()));
    }

    #[test]
    fn test_read_origin_url_not_a_repo() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_origin_url(dir.path()), None);
    }

    #[test]
    fn test_read_origin_url_no_origin() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        assert_eq!(read_origin_url(dir.path()), None);
    }

    #[test]
    fn test_read_origin_url() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.remote("origin", "git@github.com:acme/widgets.git")
            .unwrap();

        assert_eq!(
            read_origin_url(dir.path()),
            Some("git@github.com:acme/widgets.git".to_string())
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("missing");
        assert!(!is_working_copy(&gone));
        assert_eq!(read_origin_url(&gone), None);
    }
}
