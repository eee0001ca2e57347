#![allow(dead_code)]

pub mod command;
pub mod file;

/// Commit timestamp every test repository is pinned to
pub const COMMIT_DATE: &str = "2024-03-01 12:00:00 +0000";
/// `COMMIT_DATE` as it shows up in `log`
pub const RENDERED_COMMIT_DATE: &str = "Fri Mar 1 12:00:00 2024 +0000";
