use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use std::collections::BTreeMap;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.head_commit()?;
        let current_branch = self.refs().current_branch()?;
        let staged = self.staged_hashes()?;
        let removed = self.index().removed()?;
        let working = self.working_hashes()?;

        let inspector = Inspector::new(head.tracked(), &staged, &removed, &working);

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            if branch == current_branch {
                writeln!(writer, "*{branch}")?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for file_name in staged.keys() {
            writeln!(writer, "{file_name}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for file_name in &removed {
            writeln!(writer, "{file_name}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for change in inspector.unstaged_changes() {
            writeln!(writer, "{change}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for file_name in inspector.untracked_files() {
            writeln!(writer, "{file_name}")?;
        }
        writeln!(writer)?;

        Ok(())
    }

    /// Content hash of every staged snapshot
    pub(crate) fn staged_hashes(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        self.index()
            .staged()?
            .into_iter()
            .map(|file_name| {
                let content = self.index().staged_content(&file_name)?;
                Ok((file_name, ObjectId::hash(&content)))
            })
            .collect()
    }

    /// Content hash of every file in the working tree
    pub(crate) fn working_hashes(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        self.workspace()
            .list_files()?
            .into_iter()
            .map(|file_name| {
                let content = self.workspace().read_file(&file_name)?;
                Ok((file_name, ObjectId::hash(&content)))
            })
            .collect()
    }
}
