//! Configuration management for Repolink
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REPOLINK_*)
//! 3. Config file (~/.config/repolink/config.toml)
//! 4. Default values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Workspace-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root folder scanned for working copies and used for new clones
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        let root = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("repos");
        Self { root }
    }
}

/// External launcher commands
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Editor command
    pub editor: String,
    /// IDE command
    pub ide: String,
    /// File browser command
    pub file_browser: String,
    /// Preferred terminal command
    pub terminal: String,
    /// Shell used when the preferred terminal fails to launch
    pub fallback_shell: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        let file_browser = if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        let terminal = if cfg!(target_os = "windows") {
            "wt"
        } else {
            "x-terminal-emulator"
        };
        let fallback_shell = if cfg!(target_os = "windows") {
            "cmd".to_string()
        } else {
            std::env::var("SHELL").unwrap_or_else(|_| "sh".to_string())
        };

        Self {
            editor: "code".to_string(),
            ide: "code".to_string(),
            file_browser: file_browser.to_string(),
            terminal: terminal.to_string(),
            fallback_shell,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Workspace configuration
    pub workspace: WorkspaceConfig,
    /// Launcher configuration
    pub launchers: LauncherConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/repolink/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repolink").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REPOLINK_ROOT: workspace root folder
    /// - REPOLINK_EDITOR: editor command
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root) = std::env::var("REPOLINK_ROOT") {
            self.workspace.root = PathBuf::from(root);
        }

        if let Ok(editor) = std::env::var("REPOLINK_EDITOR") {
            self.launchers.editor = editor;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.workspace.root = root;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(root: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?.with_env_overrides().with_cli_overrides(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.workspace.root.ends_with("repos"));
        assert_eq!(config.launchers.editor, "code");
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(Some(PathBuf::from("/work")));
        assert_eq!(config.workspace.root, PathBuf::from("/work"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[workspace]
root = "/home/user/src"

[launchers]
editor = "hx"
terminal = "alacritty"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/home/user/src"));
        assert_eq!(config.launchers.editor, "hx");
        assert_eq!(config.launchers.terminal, "alacritty");
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[launchers]
editor = "vim"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // workspace.root keeps its default
        assert!(config.workspace.root.ends_with("repos"));
        assert_eq!(config.launchers.editor, "vim");
    }
}
