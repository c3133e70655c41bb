//! Repolink Core - Working-copy discovery and catalog linking
//!
//! This crate links locally cloned git working copies to a catalog of remote
//! repositories: scanning a folder tree for working copies, matching their
//! origin remotes against catalog entries, repairing stale links, and
//! provisioning new clones.

pub mod catalog;
pub mod config;
pub mod error;
pub mod git;
pub mod launch;
pub mod link;
pub mod remote_url;
pub mod secrets;

pub use catalog::{CatalogRepository, CatalogStore, InMemoryCatalog};
pub use config::Config;
pub use error::{Error, Result};
pub use git::{clone_repository, is_working_copy, read_origin_url, CloneCredentials};
pub use launch::{LaunchTarget, Launcher, SystemLauncher};
pub use link::{cleanup_invalid_links, provision_clone, scan_and_link, ScanSummary};
pub use remote_url::{normalize_remote_url, remote_urls_match};
pub use secrets::Secrets;
