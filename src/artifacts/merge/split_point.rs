//! Split point finder for merges
//!
//! The split point is the common ancestor both branch heads are measured
//! against in a three-way merge. It is found by walking **first-parent links
//! only** outward from both heads at once, one step per side per round,
//! remembering what each side has visited:
//!
//! - If the merge side's position equals the current side's position, or the
//!   current side has already visited it, the merge side's position is the
//!   split point.
//! - Otherwise, if the merge side has already visited the current side's
//!   position, that position is the split point.
//! - A side that reaches a root commit stays there while the other keeps
//!   walking. When neither side can move, there is no common ancestor.
//!
//! Merge-parent links are never followed, so in histories containing merges
//! the result may differ from a full lowest-common-ancestor search. Fast-forward
//! and already-merged detection are defined against this walk.
//!
//! ## Example
//!
//! ```text
//!   R <- A <- B      (current)
//!         \
//!          C <- D    (merge)
//! ```
//!
//! Round 1 visits B and D, round 2 visits A and C. In round 3 the merge side
//! stands on A, which the current side has already visited.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use tracing::debug;

/// Finds the split point of two commits
///
/// The loader returns the first parent of a commit, `None` for a root commit.
/// Keeping it generic lets the walk run against the object store or an
/// in-memory graph alike.
pub struct SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    pub fn find_split_point(
        &self,
        current_head: &ObjectId,
        merge_head: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut current = current_head.clone();
        let mut merge = merge_head.clone();
        let mut current_seen = HashSet::new();
        let mut merge_seen = HashSet::new();

        loop {
            debug!(%current, %merge, "split point walk step");

            if current == merge || current_seen.contains(&merge) {
                debug!(split_point = %merge, "found split point");
                return Ok(Some(merge));
            }
            if merge_seen.contains(&current) {
                debug!(split_point = %current, "found split point");
                return Ok(Some(current));
            }

            let current_parent = (self.parent_loader)(&current)?;
            let merge_parent = (self.parent_loader)(&merge)?;

            if current_parent.is_none() && merge_parent.is_none() {
                debug!("histories share no first-parent ancestor");
                return Ok(None);
            }

            current_seen.insert(current.clone());
            merge_seen.insert(merge.clone());

            if let Some(parent) = current_parent {
                current = parent;
            }
            if let Some(parent) = merge_parent {
                merge = parent;
            }
        }
    }
}
