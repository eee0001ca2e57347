//! Data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working-directory sync planning and the untracked-file guard
//! - `core`: Configuration and log setup
//! - `merge`: Split point search and three-way resolution
//! - `objects`: Object types (blob, commit) and their ids
//! - `status`: Untracked and unstaged change detection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod merge;
pub mod objects;
pub mod status;
