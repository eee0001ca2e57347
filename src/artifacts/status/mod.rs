//! Working tree status inspection
//!
//! ## Components
//!
//! - `file_change`: unstaged working-tree changes and their rendering
//! - `inspector`: untracked and modified-but-not-staged detection

pub mod file_change;
pub mod inspector;
