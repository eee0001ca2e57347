//! Plumbing commands
//!
//! Low-level building blocks the porcelain commands compose:
//!
//! - `write_commit`: turn the staging index into a commit and advance the current branch

pub mod write_commit;
