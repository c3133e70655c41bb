//! Open command

use std::path::Path;

use anyhow::bail;
use clap::{Args, ValueEnum};
use repolink_core::{Config, LaunchTarget, Launcher, SystemLauncher};
use repolink_db::RepositoryStore;

use super::open_database;

/// Where to open a linked working copy
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OpenIn {
    /// Text editor
    Editor,
    /// IDE
    Ide,
    /// File browser
    Files,
    /// Terminal
    Terminal,
}

impl From<OpenIn> for LaunchTarget {
    fn from(value: OpenIn) -> Self {
        match value {
            OpenIn::Editor => LaunchTarget::Editor,
            OpenIn::Ide => LaunchTarget::Ide,
            OpenIn::Files => LaunchTarget::FileBrowser,
            OpenIn::Terminal => LaunchTarget::Terminal,
        }
    }
}

/// Open a linked working copy in an external tool
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Repository to open, as `owner/repo`
    pub full_name: String,

    /// What to open the working copy in
    #[arg(long = "in", value_enum, default_value = "editor")]
    pub target: OpenIn,
}

impl OpenArgs {
    /// Execute the open command
    pub async fn execute(&self, config: &Config, db_path: Option<&Path>) -> anyhow::Result<()> {
        let db = open_database(db_path)?;

        let Some(repository) = RepositoryStore::new(&db).find_by_full_name(&self.full_name)?
        else {
            bail!("{} is not in the catalog", self.full_name);
        };

        let Some(path) = repository.local_path else {
            bail!(
                "{} has no linked working copy. Run 'repolink scan' or 'repolink clone {}'",
                self.full_name,
                self.full_name
            );
        };

        let launcher = SystemLauncher::new(config.launchers.clone());
        if !launcher.launch(self.target.into(), &path) {
            bail!("Failed to open {}", path.display());
        }

        Ok(())
    }
}
