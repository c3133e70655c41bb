//! Catalog maintenance commands

use std::path::Path;

use anyhow::bail;
use clap::{Args, Subcommand};
use repolink_db::{NewRepository, RepositoryStore};

use super::open_database;

/// Catalog maintenance commands
#[derive(Args, Debug)]
pub struct RepoArgs {
    #[command(subcommand)]
    pub command: RepoCommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// Add a repository to the catalog
    Add {
        /// Repository name as `owner/repo`
        full_name: String,

        /// Canonical web URL (defaults to https://github.com/<owner/repo>)
        #[arg(long)]
        html_url: Option<String>,

        /// Clone URL (defaults to the web URL with a .git suffix)
        #[arg(long)]
        clone_url: Option<String>,
    },

    /// List catalog entries for an owner
    List {
        /// Catalog owner
        owner: String,
    },
}

impl RepoArgs {
    /// Execute the repo command
    pub async fn execute(&self, db_path: Option<&Path>) -> anyhow::Result<()> {
        match &self.command {
            RepoCommand::Add {
                full_name,
                html_url,
                clone_url,
            } => add_repo(full_name, html_url.as_deref(), clone_url.as_deref(), db_path),
            RepoCommand::List { owner } => list_repos(owner, db_path),
        }
    }
}

fn add_repo(
    full_name: &str,
    html_url: Option<&str>,
    clone_url: Option<&str>,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    if !full_name.contains('/') {
        bail!("Repository name must be of the form owner/repo, got '{}'", full_name);
    }

    let html_url = html_url
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://github.com/{}", full_name));
    let clone_url = clone_url
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.git", html_url));

    let db = open_database(db_path)?;
    let id = RepositoryStore::new(&db).upsert(&NewRepository {
        full_name: full_name.to_string(),
        html_url,
        clone_url,
    })?;

    println!("Added {} (id {})", full_name, id);
    Ok(())
}

fn list_repos(owner: &str, db_path: Option<&Path>) -> anyhow::Result<()> {
    let db = open_database(db_path)?;
    let entries = RepositoryStore::new(&db).list_by_owner(owner)?;

    if entries.is_empty() {
        println!("No catalog entries for {}", owner);
        return Ok(());
    }

    for entry in entries {
        match &entry.local_path {
            Some(path) => println!("{}  {}", entry.full_name, path.display()),
            None => println!("{}  (unlinked)", entry.full_name),
        }
    }

    Ok(())
}
