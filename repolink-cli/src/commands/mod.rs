//! CLI command implementations

mod cleanup;
mod clone;
mod open;
mod repo;
mod scan;

pub use cleanup::CleanupArgs;
pub use clone::CloneArgs;
pub use open::OpenArgs;
pub use repo::RepoArgs;
pub use scan::ScanArgs;

use std::path::Path;

use repolink_db::Database;

/// Open the catalog database, at `path` or the default location
pub(crate) fn open_database(path: Option<&Path>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };
    Ok(db)
}
