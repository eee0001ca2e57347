//! A small local version-control system
//!
//! Snapshots of the plain files in a working tree are stored as
//! content-addressed blobs and commits under `.bitlet/`, organised into
//! branches with a single current branch, and combined with a three-way
//! merge.
//!
//! - `areas`: persistent repository state and the [`Repository`] handle
//! - `artifacts`: objects, branch names, checkout planning, merge and status algorithms
//! - `commands`: the user-level operations, implemented on [`Repository`]
//! - `errors`: the [`RepositoryError`] taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use artifacts::core::config::Config;
pub use errors::RepositoryError;
