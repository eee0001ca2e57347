use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Print the first-parent history from HEAD back to the root commit
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut next_oid = Some(self.refs().head_oid()?);

        while let Some(commit_oid) = next_oid {
            let commit = self.database().load_commit(&commit_oid)?;
            self.display_commit(&commit)?;

            next_oid = commit.parent().cloned();
        }

        Ok(())
    }

    /// Print every commit in the store, in storage order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for commit in self.database().commits()? {
            self.display_commit(&commit)?;
        }

        Ok(())
    }

    fn display_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit.id()?)?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
