use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{FileChange, WorkspaceChangeType};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Compares the working tree against HEAD and the staging index
///
/// Works on content hashes only, so it is agnostic of where the snapshots
/// came from.
#[derive(Debug, new)]
pub struct Inspector<'s> {
    /// Files tracked by the head commit
    tracked: &'s TrackedFiles,
    /// Staged name to the hash of its staged snapshot
    staged: &'s BTreeMap<String, ObjectId>,
    removed: &'s BTreeSet<String>,
    /// Working file name to the hash of its content
    working: &'s BTreeMap<String, ObjectId>,
}

impl<'s> Inspector<'s> {
    /// Working files that are neither tracked nor staged, or that are staged for removal
    pub fn untracked_files(&self) -> BTreeSet<String> {
        self.working
            .keys()
            .filter(|file_name| {
                let tracked = self.tracked.contains_key(*file_name);
                let staged = self.staged.contains_key(*file_name);
                let removed = self.removed.contains(*file_name);

                (!tracked && !staged) || removed
            })
            .cloned()
            .collect()
    }

    pub fn unstaged_changes(&self) -> BTreeSet<FileChange> {
        let mut changes = BTreeSet::new();

        for (file_name, working_oid) in self.working {
            let tracked_oid = self.tracked.get(file_name);
            let staged_oid = self.staged.get(file_name);

            // tracked, edited since the head commit, and never staged
            if tracked_oid.is_some_and(|oid| oid != working_oid) && staged_oid.is_none() {
                changes.insert(FileChange::new(file_name, WorkspaceChangeType::Modified));
            }
            // edited after staging
            if staged_oid.is_some_and(|oid| oid != working_oid) {
                changes.insert(FileChange::new(file_name, WorkspaceChangeType::Modified));
            }
        }

        for file_name in self.staged.keys() {
            if !self.working.contains_key(file_name) {
                changes.insert(FileChange::new(file_name, WorkspaceChangeType::Deleted));
            }
        }

        for file_name in self.tracked.keys() {
            if !self.working.contains_key(file_name) && !self.removed.contains(file_name) {
                changes.insert(FileChange::new(file_name, WorkspaceChangeType::Deleted));
            }
        }

        changes
    }
}
