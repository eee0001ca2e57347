use crate::artifacts::objects::commit::TrackedFiles;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictType {
    /// Not tracked by the current commit, but the target would write it
    UntrackedOverwritten,
    /// Staged for removal, and the target would delete it
    UntrackedRemoved,
}

impl ConflictType {
    pub fn get_conflict_type(
        file_name: &str,
        current: &TrackedFiles,
        target: &TrackedFiles,
        removed: &BTreeSet<String>,
    ) -> Option<ConflictType> {
        let in_current = current.contains_key(file_name);
        let in_target = target.contains_key(file_name);

        if !in_current && in_target {
            Some(ConflictType::UntrackedOverwritten)
        } else if in_current && !in_target && removed.contains(file_name) {
            Some(ConflictType::UntrackedRemoved)
        } else {
            None
        }
    }
}

/// Working files a sync from `current` to `target` would clobber
pub fn find_conflicts(
    working_files: &BTreeSet<String>,
    current: &TrackedFiles,
    target: &TrackedFiles,
    removed: &BTreeSet<String>,
) -> Vec<(String, ConflictType)> {
    working_files
        .iter()
        .filter_map(|file_name| {
            ConflictType::get_conflict_type(file_name, current, target, removed)
                .map(|conflict| (file_name.clone(), conflict))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tracked(names: &[&str]) -> TrackedFiles {
        names
            .iter()
            .map(|name| (name.to_string(), ObjectId::hash(name.as_bytes())))
            .collect()
    }

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[rstest]
    #[case::untracked_in_the_way(&[], &["f.txt"], &[], Some(ConflictType::UntrackedOverwritten))]
    #[case::removed_then_deleted_by_target(&["f.txt"], &[], &["f.txt"], Some(ConflictType::UntrackedRemoved))]
    #[case::tracked_and_deleted_by_target(&["f.txt"], &[], &[], None)]
    #[case::tracked_on_both_sides(&["f.txt"], &["f.txt"], &[], None)]
    #[case::removed_but_kept_by_target(&["f.txt"], &["f.txt"], &["f.txt"], None)]
    #[case::untracked_and_unknown_to_target(&[], &[], &[], None)]
    fn classifies_working_files(
        #[case] current: &[&str],
        #[case] target: &[&str],
        #[case] removed: &[&str],
        #[case] expected: Option<ConflictType>,
    ) {
        let conflict = ConflictType::get_conflict_type(
            "f.txt",
            &tracked(current),
            &tracked(target),
            &names(removed),
        );

        assert_eq!(conflict, expected);
    }

    #[test]
    fn only_clobbered_files_are_reported() {
        let conflicts = find_conflicts(
            &names(&["a.txt", "b.txt", "c.txt"]),
            &tracked(&["a.txt"]),
            &tracked(&["a.txt", "b.txt"]),
            &names(&[]),
        );

        assert_eq!(
            conflicts,
            vec![("b.txt".to_string(), ConflictType::UntrackedOverwritten)]
        );
    }
}
