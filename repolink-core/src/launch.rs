//! External launchers for linked working copies
//!
//! Launching an editor, IDE, file browser, or terminal is a best-effort
//! external action: each call validates the path, attempts to start exactly
//! one process, and reports success as a plain boolean. Failures never
//! propagate as errors.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::config::LauncherConfig;

/// What to open a working copy in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Text editor
    Editor,
    /// IDE, pointed at a solution file when one exists
    Ide,
    /// File browser
    FileBrowser,
    /// Terminal, falling back to a baseline shell
    Terminal,
}

/// Capability interface for launching external tools
pub trait Launcher: Send + Sync {
    /// Open the given path in the given target. Returns true on success.
    fn launch(&self, target: LaunchTarget, path: &Path) -> bool;
}

/// Launcher that spawns the commands from [`LauncherConfig`]
pub struct SystemLauncher {
    config: LauncherConfig,
}

impl SystemLauncher {
    /// Create a launcher from the given configuration
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, target: LaunchTarget, path: &Path) -> bool {
        if !path.exists() {
            warn!(path = %path.display(), "Launch target path does not exist");
            return false;
        }

        match target {
            LaunchTarget::Editor => spawn_with_arg(&self.config.editor, path),
            LaunchTarget::Ide => {
                let arg = find_solution_file(path).unwrap_or_else(|| path.to_path_buf());
                spawn_with_arg(&self.config.ide, &arg)
            }
            LaunchTarget::FileBrowser => spawn_with_arg(&self.config.file_browser, path),
            LaunchTarget::Terminal => {
                if spawn_in_dir(&self.config.terminal, path) {
                    return true;
                }
                debug!(
                    terminal = %self.config.terminal,
                    shell = %self.config.fallback_shell,
                    "Preferred terminal failed, falling back to shell"
                );
                spawn_in_dir(&self.config.fallback_shell, path)
            }
        }
    }
}

/// Pick the solution file an IDE should open, preferring the newer `.slnx`
/// format over the classic `.sln`.
fn find_solution_file(dir: &Path) -> Option<PathBuf> {
    for extension in ["slnx", "sln"] {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file() && p.extension().is_some_and(|e| e.eq_ignore_ascii_case(extension))
            })
            .collect();
        candidates.sort();
        if let Some(candidate) = candidates.into_iter().next() {
            return Some(candidate);
        }
    }
    None
}

fn spawn_with_arg(command: &str, arg: &Path) -> bool {
    match Command::new(command).arg(arg).spawn() {
        Ok(_) => true,
        Err(e) => {
            warn!(command, error = %e, "Failed to launch");
            false
        }
    }
}

fn spawn_in_dir(command: &str, dir: &Path) -> bool {
    match Command::new(command).current_dir(dir).spawn() {
        Ok(_) => true,
        Err(e) => {
            warn!(command, error = %e, "Failed to launch");
            false
        }
    }
}
