//! Secrets management for Repolink
//!
//! Secrets are stored separately from configuration to avoid accidental
//! sharing. The secrets file is located at `~/.config/repolink/secrets.toml`
//! and must have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variable (REPOLINK_TOKEN)
//! 2. Secrets file (~/.config/repolink/secrets.toml)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::git::CloneCredentials;
use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Authentication configuration
    pub auth: AuthSecrets,
}

/// Authentication-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthSecrets {
    /// Access token for HTTPS git operations
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if the file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Reject files readable by group or others
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        if let Some(ref mut token) = secrets.auth.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/repolink/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repolink").join("secrets.toml"))
    }

    /// Get the access token with environment variable override
    ///
    /// Priority: REPOLINK_TOKEN env var > secrets file
    pub fn access_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("REPOLINK_TOKEN") {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!("Using access token from REPOLINK_TOKEN environment variable");
                return Some(token);
            }
        }

        if let Some(ref token) = self.auth.token {
            if !token.is_empty() {
                debug!("Using access token from secrets file");
                return Some(token.clone());
            }
        }

        None
    }

    /// Credentials for an outbound clone
    ///
    /// Token-as-username with an empty password when a token is configured,
    /// the ambient default otherwise.
    pub fn clone_credentials(&self) -> CloneCredentials {
        match self.access_token() {
            Some(token) => CloneCredentials::Token(token),
            None => CloneCredentials::Default,
        }
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        // Don't overwrite an existing file
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# Repolink Secrets
# This file contains sensitive credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[auth]
# Access token used for HTTPS git clones
token = ""
"#;

        std::fs::write(&path, template).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your token");

        Ok(path)
    }
}
