//! Remote URL normalization and matching
//!
//! A remote URL is reduced to its `owner/repo` path fragment so that catalog
//! entries and working-copy origins can be compared regardless of scheme
//! (https vs ssh), host casing, or a trailing `.git` suffix.
//!
//! Two forms are recognized:
//! - absolute URIs (`https://github.com/owner/repo.git`)
//! - SCP-style remotes (`git@github.com:owner/repo.git`)
//!
//! Anything else fails to normalize.

/// Normalize a remote URL into its `owner/repo` path fragment.
///
/// Strips a trailing `.git` suffix. Returns `None` for empty input or input
/// that is neither an absolute URI nor an SCP-style remote.
pub fn normalize_remote_url(url: &str) -> Option<String> {
    normalize_remote_url_with(url, true)
}

/// Normalize a remote URL, optionally keeping a trailing `.git` suffix.
pub fn normalize_remote_url_with(url: &str, strip_git_suffix: bool) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Ok(parsed) = url::Url::parse(url) {
        return finish_path(parsed.path(), strip_git_suffix);
    }

    if let Some(path) = scp_style_path(url) {
        return finish_path(path, strip_git_suffix);
    }

    None
}

/// Check whether a catalog URL and a working-copy remote URL refer to the
/// same repository.
///
/// Both sides are normalized and compared case-insensitively. If either side
/// fails to normalize the result is false.
pub fn remote_urls_match(catalog_url: &str, remote_url: &str) -> bool {
    match (
        normalize_remote_url(catalog_url),
        normalize_remote_url(remote_url),
    ) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(&b),
        _ => false,
    }
}

/// Strip a single leading slash and, when requested, a trailing `.git`.
fn finish_path(path: &str, strip_git_suffix: bool) -> Option<String> {
    let mut path = path.strip_prefix('/').unwrap_or(path).to_string();

    if strip_git_suffix && path.len() >= 4 {
        if let Some(tail) = path.get(path.len() - 4..) {
            if tail.eq_ignore_ascii_case(".git") {
                path.truncate(path.len() - 4);
            }
        }
    }

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Extract the path component of an SCP-style remote (`user@host:path`).
///
/// `user` and `host` are restricted to alphanumerics, dot, underscore, and
/// hyphen; anything else is not treated as an SCP remote.
fn scp_style_path(url: &str) -> Option<&str> {
    let (user, rest) = url.split_once('@')?;
    let (host, path) = rest.split_once(':')?;

    let ident_ok = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    };

    if ident_ok(user) && ident_ok(host) {
        Some(path)
    } else {
        None
    }
}
