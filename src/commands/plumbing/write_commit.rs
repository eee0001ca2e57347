use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use tracing::info;

impl Repository {
    /// Record the staged changes as a new commit on the current branch
    ///
    /// The new snapshot starts from HEAD's tracked files, drops every name
    /// staged for removal and points every staged name at a blob of its
    /// staged content. The branch pointer then moves to the new commit and
    /// both staging sets are cleared.
    pub fn write_commit(
        &mut self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        let staged = self.index().staged()?;
        let removed = self.index().removed()?;

        if staged.is_empty() && removed.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        let branch = self.refs().current_branch()?;
        let head = self.head_commit()?;
        let mut tracked = head.tracked().clone();

        for file_name in &removed {
            tracked.remove(file_name);
        }
        for file_name in &staged {
            let content = self.index().staged_content(file_name)?;
            let blob_oid = self.database().store_blob(&Blob::new(content))?;
            tracked.insert(file_name.clone(), blob_oid);
        }

        let commit = Commit::new(
            self.config().commit_timestamp(),
            message.to_string(),
            tracked,
            Some(head.id()?.clone()),
            merge_parent,
        );
        let commit = self.database().store_commit(commit)?;
        let commit_oid = commit.id()?;

        self.refs().set_branch_head(&branch, commit_oid)?;
        self.index().clear()?;

        info!(%branch, oid = %commit_oid, files = commit.tracked().len(), "created commit");

        Ok(commit)
    }
}
