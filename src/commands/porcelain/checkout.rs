use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use tracing::info;

impl Repository {
    /// Switch HEAD to `branch_name` and rewrite the working tree to its head commit
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_branch = self.existing_branch(branch_name)?;
        if self.refs().is_current_branch(&target_branch)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let target_oid = self.refs().branch_head(&target_branch)?;
        let target = self.database().load_commit(&target_oid)?;
        self.sync_working_tree(&target)?;

        self.refs().set_current_branch(&target_branch)?;

        info!(branch = %target_branch, oid = %target_oid, "checked out branch");

        Ok(())
    }

    /// Restore a single working file from HEAD or from the commit `commit_prefix` names
    ///
    /// Staging is left alone.
    pub fn checkout_file(
        &mut self,
        commit_prefix: Option<&str>,
        file_name: &str,
    ) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit = match commit_prefix {
            Some(prefix) => {
                let oid = self.database().resolve_prefix(prefix)?;
                self.database().load_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        let blob_oid = commit
            .tracked_oid(file_name)
            .filter(|_| Workspace::is_plain_file_name(file_name))
            .ok_or(RepositoryError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(file_name, blob.content())
    }

    /// Bring the working tree from HEAD's snapshot to `target`'s and clear staging
    ///
    /// Nothing is written when an untracked file would be lost.
    pub(crate) fn sync_working_tree(&self, target: &Commit) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let working_files = self.workspace().list_files()?;
        let removed = self.index().removed()?;

        let migration = Migration::plan(&current, target, &working_files, &removed)?;
        self.workspace()
            .apply_migration(&migration, self.database())?;
        self.index().clear()
    }

    /// Parse a branch name given on the command line and make sure the branch exists
    pub(crate) fn existing_branch(&self, branch_name: &str) -> anyhow::Result<BranchName> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;

        if self.refs().branch_exists(&branch_name) {
            Ok(branch_name)
        } else {
            Err(RepositoryError::NoSuchBranch.into())
        }
    }
}
