use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// The working tree: plain files directly under the repository root
///
/// Subdirectories, including the repository marker directory, are never
/// tracked and are ignored when listing.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Whether `file_name` names an entry directly under the root
    ///
    /// Anything with a path separator, or `.`/`..`, could reach outside the
    /// working tree or into the marker directory.
    pub fn is_plain_file_name(file_name: &str) -> bool {
        !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\'])
    }

    /// Names of the plain files in the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        Ok(WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect())
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.file_path(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(file_name);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Create or overwrite a working file
    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(file_name);
        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a working file if it is present
    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(file_name);
        if !file_path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {:?}", file_path))
    }

    // deletions first, then writes
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        for file_name in migration.deletions() {
            self.remove_file(file_name)?;
        }

        for (file_name, oid) in migration.writes() {
            let blob = database.load_blob(oid)?;
            self.write_file(file_name, blob.content())?;
        }

        debug!(
            writes = migration.writes().len(),
            deletions = migration.deletions().len(),
            "applied working tree migration"
        );

        Ok(())
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }
}
