//! Merge engine building blocks
//!
//! - `split_point`: the first-parent walk that picks the merge baseline
//! - `resolution`: per-file three-way classification and conflict content

pub mod resolution;
pub mod split_point;
