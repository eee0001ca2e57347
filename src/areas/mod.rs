//! Core repository components
//!
//! The persistent areas of a repository:
//!
//! - `database`: Object store for blobs and commits
//! - `index`: Staging index of pending additions and removals
//! - `refs`: Branch pointers and HEAD
//! - `repository`: The repository handle tying the areas together
//! - `workspace`: Working directory file access

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
