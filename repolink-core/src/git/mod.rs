//! Git working-copy access
//!
//! Detection and validation of working copies, soft origin-URL reading, and
//! authenticated cloning.

mod clone;
mod repo;

pub use clone::{clone_repository, CloneCredentials};
pub use repo::{is_working_copy, read_origin_url, GIT_DIR_NAME};
