//! Branches and HEAD
//!
//! A branch is a named pointer to a commit; HEAD names the current branch.
//! There is no detached state: HEAD always holds a branch name.
//!
//! ## File Format
//!
//! - `branches/<name>`: the 40-character id of the branch's head commit
//! - `head`: the name of the current branch
//!
//! Ref files are rewritten in place under an exclusive lock.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const BRANCHES_DIR: &str = "branches";
const HEAD_FILE: &str = "head";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository marker directory
    path: Box<Path>,
}

impl Refs {
    pub fn init(&self) -> anyhow::Result<()> {
        let branches_path = self.branches_path();
        std::fs::create_dir_all(&branches_path).with_context(|| {
            format!("failed to create branches directory at {:?}", branches_path)
        })
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), branch_name.as_ref())?;
        debug!(branch = %branch_name, "moved HEAD");

        Ok(())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn branch_head(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Err(RepositoryError::NoSuchBranch.into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;

        ObjectId::try_parse(content.trim().to_string())
    }

    /// Id of the current branch's head commit
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.branch_head(&self.current_branch()?)
    }

    pub fn set_branch_head(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())?;
        debug!(branch = %branch_name, %oid, "moved branch pointer");

        Ok(())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(RepositoryError::BranchAlreadyExists.into());
        }

        self.set_branch_head(branch_name, oid)
    }

    /// Delete the pointer only; the commits it reached stay in the store
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branch_exists(branch_name) {
            return Err(RepositoryError::NoSuchBranch.into());
        }
        if self.is_current_branch(branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrentBranch.into());
        }

        let oid = self.branch_head(branch_name)?;
        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        debug!(branch = %branch_name, "deleted branch");

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        WalkDir::new(self.branches_path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| BranchName::try_parse(entry.file_name().to_string_lossy().to_string()))
            .collect()
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // open the ref file as WRONLY and CREAT, then truncate once the lock is held
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut().set_len(0)?;
        lock.deref_mut()
            .write_all(raw_ref.as_bytes())
            .with_context(|| format!("failed to write ref file at {:?}", path))?;

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.branches_path().join(branch_name.as_ref())
    }

    fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCHES_DIR)
    }

    fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }
}
