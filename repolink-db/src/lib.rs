//! SQLite-backed catalog store for Repolink
//!
//! Implements the core's `CatalogStore` contract on top of a local SQLite
//! database, plus the thin CRUD surface the CLI uses to maintain catalog
//! entries.

mod connection;
pub mod error;
pub mod repos;

pub use connection::Database;
pub use error::{Error, Result};
pub use repos::{NewRepository, RepositoryStore};
