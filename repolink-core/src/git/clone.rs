//! Authenticated repository cloning

use std::path::{Path, PathBuf};

use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, RemoteCallbacks};
use tracing::debug;

use crate::{Error, Result};

/// Authentication material for an outbound clone
#[derive(Debug, Clone)]
pub enum CloneCredentials {
    /// Configured access token, sent as username with an empty password
    Token(String),
    /// No configured token; use ssh-agent or libgit2 defaults
    Default,
}

/// Clone a repository into the given target directory.
///
/// Credentials are supplied on demand for any fetch authentication
/// challenge. Returns the working-copy path on success.
pub fn clone_repository(
    url: &str,
    target: &Path,
    credentials: &CloneCredentials,
) -> Result<PathBuf> {
    let mut callbacks = RemoteCallbacks::new();
    let credentials = credentials.clone();
    callbacks.credentials(move |_url, username_from_url, _allowed_types| {
        match &credentials {
            CloneCredentials::Token(token) => Cred::userpass_plaintext(token, ""),
            CloneCredentials::Default => match username_from_url {
                Some(username) => Cred::ssh_key_from_agent(username),
                None => Cred::default(),
            },
        }
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    debug!(url, target = %target.display(), "Cloning repository");

    let repo = RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, target)
        .map_err(|e| Error::Git(format!("Failed to clone {}: {}", url, e.message())))?;

    Ok(repo
        .workdir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| target.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_repo(dir: &Path) {
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
    }

    #[test]
    fn test_clone_from_local_path() {
        let source = TempDir::new().unwrap();
        source_repo(source.path());

        let work = TempDir::new().unwrap();
        let target = work.path().join("widgets");

        let path = clone_repository(
            source.path().to_str().unwrap(),
            &target,
            &CloneCredentials::Default,
        )
        .unwrap();

        assert!(path.join("README.md").exists());
        assert!(crate::git::is_working_copy(&path));
    }

    #[test]
    fn test_clone_from_missing_source() {
        let work = TempDir::new().unwrap();
        let target = work.path().join("widgets");

        let result = clone_repository(
            "/nonexistent/source/repo",
            &target,
            &CloneCredentials::Default,
        );
        assert!(result.is_err());
    }
}
