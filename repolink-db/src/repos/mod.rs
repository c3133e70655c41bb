//! Repository objects over the database

pub mod repositories;

pub use repositories::{NewRepository, RepositoryStore};
