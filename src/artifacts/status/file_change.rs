#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

/// A working-tree change the staging index does not reflect
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileChange {
    pub(crate) file_name: String,
    pub(crate) change: WorkspaceChangeType,
}

impl FileChange {
    pub fn new(file_name: impl Into<String>, change: WorkspaceChangeType) -> Self {
        FileChange {
            file_name: file_name.into(),
            change,
        }
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change: &str = (&self.change).into();
        write!(f, "{} ({})", self.file_name, change)
    }
}
