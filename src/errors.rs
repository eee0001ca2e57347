//! Repository error taxonomy
//!
//! Every anticipated failure of a user-level operation is a variant of
//! [`RepositoryError`]. Its `Display` output is the exact single line shown
//! to the user. Operations return `anyhow::Result`, so these errors travel
//! wrapped in `anyhow::Error` and are recovered with `downcast_ref`.
//! Anything else (I/O failures, corrupt objects) is a hard error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Not in an initialized Bitlet directory.")]
    NotInitialized,

    #[error("A Bitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("Please enter a command.")]
    NoCommand,

    #[error("No command with that name exists.")]
    NoSuchCommand,

    /// `add` on a file missing from the working directory
    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No commit with that id exists.")]
    NoCommitWithId,

    #[error("Prefix does not identify a unique commit.")]
    AmbiguousId,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedFileConflict,

    #[error("Cannot merge a branch with itself.")]
    CannotMergeSelf,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyAncestor,
}

impl RepositoryError {
    /// Extract a domain error from an `anyhow` chain, if that is what it carries
    pub fn from_anyhow(error: &anyhow::Error) -> Option<&RepositoryError> {
        error.downcast_ref::<RepositoryError>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_survive_anyhow_wrapping() {
        let error: anyhow::Error = RepositoryError::UncommittedChanges.into();
        let error = error.context("while merging");

        assert_eq!(
            RepositoryError::from_anyhow(&error),
            Some(&RepositoryError::UncommittedChanges)
        );
    }

    #[test]
    fn io_errors_are_not_domain_errors() {
        let error: anyhow::Error = std::io::Error::other("disk on fire").into();
        assert_eq!(RepositoryError::from_anyhow(&error), None);
    }

    #[test]
    fn messages_are_single_lines() {
        let message = RepositoryError::UntrackedFileConflict.to_string();
        assert_eq!(
            message,
            "There is an untracked file in the way; delete it or add it first."
        );
        assert!(!message.contains('\n'));
    }
}
