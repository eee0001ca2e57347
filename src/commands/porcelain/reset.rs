use crate::areas::repository::Repository;
use tracing::info;

impl Repository {
    /// Rewrite the working tree to the commit `commit_prefix` names and move
    /// the current branch there
    pub fn reset(&mut self, commit_prefix: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_prefix(commit_prefix)?;
        let target = self.database().load_commit(&target_oid)?;
        self.sync_working_tree(&target)?;

        let branch = self.refs().current_branch()?;
        self.refs().set_branch_head(&branch, &target_oid)?;

        info!(%branch, oid = %target_oid, "reset branch");

        Ok(())
    }
}
