//! Porcelain commands (user-facing operations)
//!
//! Each command is an inherent method on [`Repository`](crate::areas::repository::Repository),
//! validates every precondition before it mutates anything and reports
//! anticipated failures as [`RepositoryError`](crate::errors::RepositoryError).
//!
//! ## Commands
//!
//! - `init`: Create the repository with its root commit and `master` branch
//! - `add`: Stage a file for the next commit
//! - `commit`: Record the staged changes
//! - `rm`: Unstage a file or stage its removal
//! - `log`: Show first-parent history, or every commit (`global_log`)
//! - `find`: Look up commits by message
//! - `status`: Show branches, staging and working tree state
//! - `checkout`: Switch branches or restore single files
//! - `branch`: Create or delete branches
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
