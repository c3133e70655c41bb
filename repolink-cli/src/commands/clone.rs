//! Clone command

use std::path::Path;

use anyhow::bail;
use clap::Args;
use repolink_core::{provision_clone, Config, Secrets};
use repolink_db::RepositoryStore;

use super::open_database;

/// Clone a catalog repository into the workspace root and link it
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository to clone, as `owner/repo`
    pub full_name: String,
}

impl CloneArgs {
    /// Execute the clone command
    pub async fn execute(&self, config: &Config, db_path: Option<&Path>) -> anyhow::Result<()> {
        let db = open_database(db_path)?;

        let Some(repository) = RepositoryStore::new(&db).find_by_full_name(&self.full_name)?
        else {
            bail!(
                "{} is not in the catalog. Add it with 'repolink repo add {}'",
                self.full_name,
                self.full_name
            );
        };

        let secrets = Secrets::load()?;
        let credentials = secrets.clone_credentials();

        let provisioned = provision_clone(
            &db,
            &config.workspace.root,
            repository.name(),
            repository.id,
            &repository.clone_url,
            &credentials,
        )
        .await?;

        match provisioned {
            Some(path) => {
                println!("{} linked at {}", repository.full_name, path.display());
                Ok(())
            }
            None => bail!("Could not provision {}; see log output", self.full_name),
        }
    }
}
