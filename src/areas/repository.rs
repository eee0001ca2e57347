use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository marker directory inside the working tree
pub const MARKER_DIR: &str = ".bitlet";

/// Handle on one repository, passed by exclusive reference to every command
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    refs: Refs,
    workspace: Workspace,
    config: Config,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Self::with_config(Config::new(path.as_ref()), writer)
    }

    pub fn with_config(config: Config, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = config
            .root()
            .canonicalize()
            .with_context(|| format!("working tree {:?} is not accessible", config.root()))?;
        let marker_path = path.join(MARKER_DIR);

        Ok(Repository {
            database: Database::new(marker_path.clone().into_boxed_path()),
            index: Index::new(marker_path.clone().into_boxed_path()),
            refs: Refs::new(marker_path.into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn marker_path(&self) -> Box<Path> {
        self.path.join(MARKER_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.marker_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotInitialized.into())
        }
    }

    /// The commit the current branch points to
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.refs.head_oid()?;
        self.database.load_commit(&head_oid)
    }
}
