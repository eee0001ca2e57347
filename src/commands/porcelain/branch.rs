use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use tracing::info;

impl Repository {
    /// Create `branch_name` pointing at the current head commit; HEAD stays put
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)?;
        info!(branch = %branch_name, oid = %head_oid, "created branch");

        Ok(())
    }

    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = self.existing_branch(branch_name)?;
        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
