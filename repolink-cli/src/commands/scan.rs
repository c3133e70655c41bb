//! Scan command

use std::path::Path;

use clap::Args;
use repolink_core::{scan_and_link, Config};

use super::open_database;

/// Scan the workspace root and link discovered working copies
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Catalog owner whose repositories should be linked
    pub owner: String,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config: &Config, db_path: Option<&Path>) -> anyhow::Result<()> {
        let db = open_database(db_path)?;

        let summary = scan_and_link(&db, &config.workspace.root, &self.owner).await?;

        println!(
            "Scanned {} working copies under {}",
            summary.scanned,
            config.workspace.root.display()
        );
        println!(
            "{} linked, {} stale links cleared",
            summary.linked, summary.cleared
        );

        Ok(())
    }
}
