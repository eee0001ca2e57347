//! Working-directory sync
//!
//! Checkout-to-branch and reset both rewrite the working tree to match a
//! target commit. Every working file is checked against the untracked-file
//! guard before any change is planned, and nothing is written unless the
//! whole plan is clean.

pub mod conflict;
pub mod migration;
