use crate::areas::repository::Repository;
use crate::artifacts::merge::resolution::{Resolution, clobbers_untracked, conflict_content};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::{Commit, TrackedFiles};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::RepositoryError;
use std::collections::BTreeSet;
use tracing::{debug, info};

const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    /// Merge the head of `branch_name` into the current branch
    ///
    /// Returns whether the merge commit carries conflict markers.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<bool> {
        self.ensure_initialized()?;

        if !self.index().is_empty()? {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let other_branch = self.existing_branch(branch_name)?;
        let current_branch = self.refs().current_branch()?;
        if other_branch == current_branch {
            return Err(RepositoryError::CannotMergeSelf.into());
        }

        let current = self.head_commit()?;
        let current_oid = current.id()?.clone();
        let other_oid = self.refs().branch_head(&other_branch)?;
        let other = self.database().load_commit(&other_oid)?;

        let split_oid = SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.database().load_commit(oid)?.parent().cloned())
        })
        .find_split_point(&current_oid, &other_oid)?;

        // unrelated histories merge against an empty snapshot
        let split_tracked = match &split_oid {
            Some(oid) => self.database().load_commit(oid)?.tracked().clone(),
            None => TrackedFiles::new(),
        };

        self.guard_untracked_files(&split_tracked, &current, &other)?;

        if split_oid.as_ref() == Some(&other_oid) {
            return Err(RepositoryError::AlreadyAncestor.into());
        }
        if split_oid.as_ref() == Some(&current_oid) {
            self.refs().set_branch_head(&current_branch, &other_oid)?;
            info!(branch = %current_branch, oid = %other_oid, "fast-forwarded");
            writeln!(self.writer(), "{FAST_FORWARD_NOTICE}")?;

            return Ok(false);
        }

        let conflicted = self.reconcile(&split_tracked, &current, &other)?;

        let message = format!("Merged {other_branch} into {current_branch}.");
        self.write_commit(&message, Some(other_oid))?;

        if conflicted {
            writeln!(self.writer(), "{CONFLICT_NOTICE}")?;
        }

        Ok(conflicted)
    }

    /// Refuse the merge when it would write over a file the current head does not track
    fn guard_untracked_files(
        &self,
        split: &TrackedFiles,
        current: &Commit,
        other: &Commit,
    ) -> anyhow::Result<()> {
        let staged = self.staged_hashes()?;
        let removed = self.index().removed()?;
        let working = self.working_hashes()?;
        let inspector = Inspector::new(current.tracked(), &staged, &removed, &working);

        for file_name in inspector.untracked_files() {
            if clobbers_untracked(
                split.get(&file_name),
                current.tracked_oid(&file_name),
                other.tracked_oid(&file_name),
            ) {
                debug!(%file_name, "untracked file blocks merge");
                return Err(RepositoryError::UntrackedFileConflict.into());
            }
        }

        Ok(())
    }

    /// Apply the three-way resolution of every file to the working tree and staging
    ///
    /// Returns whether any file ended in conflict.
    fn reconcile(
        &self,
        split: &TrackedFiles,
        current: &Commit,
        other: &Commit,
    ) -> anyhow::Result<bool> {
        let file_names = split
            .keys()
            .chain(current.tracked().keys())
            .chain(other.tracked().keys())
            .cloned()
            .collect::<BTreeSet<_>>();

        let mut conflicted = false;

        for file_name in &file_names {
            let current_oid = current.tracked_oid(file_name);
            let other_oid = other.tracked_oid(file_name);
            let resolution = Resolution::resolve(split.get(file_name), current_oid, other_oid);

            debug!(%file_name, ?resolution, "resolved file");

            match resolution {
                Resolution::TakeMerge(blob_oid) => {
                    let blob = self.database().load_blob(&blob_oid)?;
                    self.workspace().write_file(file_name, blob.content())?;
                    self.index().stage(file_name, blob.content())?;
                }
                Resolution::Remove => {
                    self.workspace().remove_file(file_name)?;
                    self.index().mark_removed(file_name)?;
                }
                Resolution::Conflict => {
                    let current_blob = current_oid
                        .map(|oid| self.database().load_blob(oid))
                        .transpose()?;
                    let other_blob = other_oid
                        .map(|oid| self.database().load_blob(oid))
                        .transpose()?;

                    let content = conflict_content(
                        current_blob.as_ref().map(|blob| blob.content().as_ref()),
                        other_blob.as_ref().map(|blob| blob.content().as_ref()),
                    );
                    self.workspace().write_file(file_name, &content)?;
                    self.index().stage(file_name, &content)?;

                    conflicted = true;
                }
                Resolution::Keep => {}
            }
        }

        Ok(conflicted)
    }
}
