//! Three-way reconciliation
//!
//! Every file name tracked by the split point, the current head or the merge
//! head is classified from its three optional blob ids `(s, c, m)`, where an
//! absent id means the commit does not track the file.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

const CONFLICT_HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &[u8] = b"=======\n";
const CONFLICT_END_MARKER: &[u8] = b">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Only the merge side changed the file: take its blob
    TakeMerge(ObjectId),
    /// The merge side deleted a file the current side left untouched
    Remove,
    /// Both sides changed the file in different ways
    Conflict,
    /// Leave the current side's state as it is
    Keep,
}

impl Resolution {
    pub fn resolve(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        merge: Option<&ObjectId>,
    ) -> Resolution {
        match merge {
            Some(merge_oid) if split == current && split != merge => {
                Resolution::TakeMerge(merge_oid.clone())
            }
            None if split == current => Resolution::Remove,
            _ if split != merge && current != merge => Resolution::Conflict,
            _ => Resolution::Keep,
        }
    }
}

/// Whether a merge would write over an untracked working file of this name
///
/// Applies to files neither tracked by the current head nor staged, and to
/// files staged for removal.
pub fn clobbers_untracked(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    merge: Option<&ObjectId>,
) -> bool {
    if split.is_none() && current.is_none() && merge.is_none() {
        return false;
    }

    (split == current && split != merge) || (split != merge && current != merge)
}

/// Conflict file content built from both sides' bytes
///
/// A side that does not track the file contributes nothing. No newline is
/// inserted after either side's content.
pub fn conflict_content(current: Option<&[u8]>, merge: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let merge = merge.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + merge.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER);
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR);
    content.extend_from_slice(merge);
    content.extend_from_slice(CONFLICT_END_MARKER);

    content.into()
}
