use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;

impl Repository {
    /// Unstage `file_name`, and if the head commit tracks it, stage its
    /// removal and delete it from the working tree
    pub fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !Workspace::is_plain_file_name(file_name) {
            return Err(RepositoryError::NoReasonToRemove.into());
        }

        let head = self.head_commit()?;
        let staged = self.index().is_staged(file_name);
        let tracked = head.tracks(file_name);

        if !staged && !tracked {
            return Err(RepositoryError::NoReasonToRemove.into());
        }

        if staged {
            self.index().unstage(file_name)?;
        }
        if tracked {
            self.index().mark_removed(file_name)?;
            self.workspace().remove_file(file_name)?;
        }

        Ok(())
    }
}
