use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use tracing::debug;

impl Repository {
    /// Stage the working copy of `file_name` for the next commit
    ///
    /// Content identical to the head commit's snapshot leaves nothing staged.
    pub fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !Workspace::is_plain_file_name(file_name) || !self.workspace().exists(file_name) {
            return Err(RepositoryError::FileNotFound.into());
        }

        let content = self.workspace().read_file(file_name)?;
        let head = self.head_commit()?;

        if head.tracked_oid(file_name) == Some(&ObjectId::hash(&content)) {
            let unstaged = self.index().unstage(file_name)?;
            let restored = self.index().unmark_removed(file_name)?;
            debug!(file_name, unstaged, restored, "content matches head, nothing to stage");
        } else {
            self.index().stage(file_name, &content)?;
        }

        Ok(())
    }
}
