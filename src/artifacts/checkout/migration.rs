//! Working-directory sync planning
//!
//! A migration rewrites the working tree from the current commit's snapshot
//! to a target commit's snapshot:
//!
//! 1. Check every working file against the untracked-file guard
//! 2. Plan a write for every file the target tracks
//! 3. Plan a deletion for every file only the current commit tracks
//!
//! Planning never touches the file system, so a failing guard leaves the
//! repository exactly as it was.

use crate::artifacts::checkout::conflict::find_conflicts;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    /// File name to the blob its working file must hold
    writes: BTreeMap<String, ObjectId>,
    deletions: BTreeSet<String>,
}

impl Migration {
    pub fn plan(
        current: &Commit,
        target: &Commit,
        working_files: &BTreeSet<String>,
        removed: &BTreeSet<String>,
    ) -> anyhow::Result<Self> {
        let conflicts = find_conflicts(working_files, current.tracked(), target.tracked(), removed);
        if !conflicts.is_empty() {
            debug!(?conflicts, "working tree sync blocked");
            return Err(RepositoryError::UntrackedFileConflict.into());
        }

        let writes = target.tracked().clone();
        let deletions = current
            .tracked()
            .keys()
            .filter(|file_name| !target.tracks(file_name))
            .cloned()
            .collect::<BTreeSet<_>>();

        debug!(
            writes = writes.len(),
            deletions = deletions.len(),
            "planned working tree sync"
        );

        Ok(Migration { writes, deletions })
    }

    pub fn writes(&self) -> &BTreeMap<String, ObjectId> {
        &self.writes
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::TrackedFiles;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn commit_tracking(files: &[(&str, &str)]) -> Commit {
        let tracked = files
            .iter()
            .map(|(name, content)| (name.to_string(), ObjectId::hash(content.as_bytes())))
            .collect::<TrackedFiles>();

        Commit::new(
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            "snapshot".to_string(),
            tracked,
            None,
            None,
        )
    }

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn plans_writes_for_target_and_deletions_for_current_only_files() {
        let current = commit_tracking(&[("f.txt", "wug"), ("g.txt", "not wug")]);
        let target = commit_tracking(&[("f.txt", "wug 2"), ("h.txt", "new")]);

        let migration =
            Migration::plan(&current, &target, &names(&["f.txt", "g.txt"]), &names(&[])).unwrap();

        assert_eq!(
            migration.writes().keys().collect::<Vec<_>>(),
            vec!["f.txt", "h.txt"]
        );
        assert_eq!(migration.deletions(), &names(&["g.txt"]));
    }

    #[test]
    fn untracked_file_blocks_the_whole_plan() {
        let current = commit_tracking(&[("f.txt", "wug")]);
        let target = commit_tracking(&[("f.txt", "wug"), ("h.txt", "new")]);

        let error = Migration::plan(
            &current,
            &target,
            &names(&["f.txt", "h.txt"]),
            &names(&[]),
        )
        .unwrap_err();

        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::UntrackedFileConflict)
        );
    }
}
