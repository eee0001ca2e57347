use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use tracing::info;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.marker_path())
            .with_context(|| format!("failed to create {:?}", self.marker_path()))?;

        self.database().init()?;
        self.index().init()?;
        self.refs().init()?;

        let root = self.database().store_commit(Commit::root())?;
        let master = BranchName::default_branch();

        self.refs().create_branch(&master, root.id()?)?;
        self.refs().set_current_branch(&master)?;

        info!(path = %self.path().display(), root = %root.id()?, "initialized repository");

        Ok(())
    }
}
