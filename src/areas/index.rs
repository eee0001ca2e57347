//! Staging index
//!
//! Two disjoint sets over working-tree file names:
//!
//! - `staged/<name>`: a snapshot of the content to record for `name` in the next commit
//! - `removed/<name>`: a zero-length marker asking the next commit to stop tracking `name`
//!
//! Staging a name for addition drops any removal marker for it and vice versa,
//! so a name is never in both sets at once. Both sets are cleared together
//! after every commit and every full working-directory sync.

use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const STAGED_DIR: &str = "staged";
const REMOVED_DIR: &str = "removed";

#[derive(Debug)]
pub struct Index {
    /// Path to the repository marker directory
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn init(&self) -> anyhow::Result<()> {
        for dir in [self.staged_path(), self.removed_path()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create staging directory {:?}", dir))?;
        }

        Ok(())
    }

    /// Names staged for addition, sorted
    pub fn staged(&self) -> anyhow::Result<BTreeSet<String>> {
        Self::list_names(&self.staged_path())
    }

    /// Names staged for removal, sorted
    pub fn removed(&self) -> anyhow::Result<BTreeSet<String>> {
        Self::list_names(&self.removed_path())
    }

    pub fn is_staged(&self, file_name: &str) -> bool {
        self.staged_path().join(file_name).is_file()
    }

    pub fn is_removed(&self, file_name: &str) -> bool {
        self.removed_path().join(file_name).is_file()
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.staged()?.is_empty() && self.removed()?.is_empty())
    }

    /// Snapshot `content` for the next commit and drop any removal marker
    pub fn stage(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let staged_file = self.staged_path().join(file_name);
        std::fs::write(&staged_file, content)
            .with_context(|| format!("failed to stage file at {:?}", staged_file))?;
        self.unmark_removed(file_name)?;

        debug!(file_name, "staged for addition");
        Ok(())
    }

    /// Drop the staged snapshot of `file_name`, returning whether there was one
    pub fn unstage(&self, file_name: &str) -> anyhow::Result<bool> {
        Self::remove_if_present(&self.staged_path().join(file_name))
    }

    /// Mark `file_name` for removal and drop any staged snapshot of it
    pub fn mark_removed(&self, file_name: &str) -> anyhow::Result<()> {
        self.unstage(file_name)?;

        let marker = self.removed_path().join(file_name);
        std::fs::write(&marker, b"")
            .with_context(|| format!("failed to write removal marker at {:?}", marker))?;

        debug!(file_name, "staged for removal");
        Ok(())
    }

    pub fn unmark_removed(&self, file_name: &str) -> anyhow::Result<bool> {
        Self::remove_if_present(&self.removed_path().join(file_name))
    }

    pub fn staged_content(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let staged_file = self.staged_path().join(file_name);
        let content = std::fs::read(&staged_file)
            .with_context(|| format!("failed to read staged file at {:?}", staged_file))?;

        Ok(content.into())
    }

    /// Empty both staging sets
    pub fn clear(&self) -> anyhow::Result<()> {
        for file_name in self.staged()? {
            self.unstage(&file_name)?;
        }
        for file_name in self.removed()? {
            self.unmark_removed(&file_name)?;
        }

        debug!("cleared staging index");
        Ok(())
    }

    fn list_names(dir: &Path) -> anyhow::Result<BTreeSet<String>> {
        if !dir.is_dir() {
            return Ok(BTreeSet::new());
        }

        let mut names = BTreeSet::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to list staging directory {:?}", dir))?
        {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(names)
    }

    fn remove_if_present(path: &Path) -> anyhow::Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        std::fs::remove_file(path).with_context(|| format!("failed to remove {:?}", path))?;
        Ok(true)
    }

    fn staged_path(&self) -> PathBuf {
        self.path.join(STAGED_DIR)
    }

    fn removed_path(&self) -> PathBuf {
        self.path.join(REMOVED_DIR)
    }
}
