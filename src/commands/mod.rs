//! Command implementations
//!
//! - `plumbing`: the commit engine that turns staging into a commit
//! - `porcelain`: user-facing commands (add, commit, log, merge, etc.)
//!
//! Porcelain commands compose the plumbing with the repository areas.

pub mod plumbing;
pub mod porcelain;
