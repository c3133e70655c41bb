//! Cleanup command

use std::path::Path;

use clap::Args;
use repolink_core::cleanup_invalid_links;

use super::open_database;

/// Clear links whose working copies are gone or no longer match
#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Catalog owner whose links should be re-validated
    pub owner: String,
}

impl CleanupArgs {
    /// Execute the cleanup command
    pub async fn execute(&self, db_path: Option<&Path>) -> anyhow::Result<()> {
        let db = open_database(db_path)?;

        let cleared = cleanup_invalid_links(&db, &self.owner).await?;

        if cleared == 0 {
            println!("All links for {} are valid", self.owner);
        } else {
            println!("Cleared {} stale links for {}", cleared, self.owner);
        }

        Ok(())
    }
}
