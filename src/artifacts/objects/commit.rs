//! Commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - A timestamp rendered in a fixed format
//! - A message
//! - The tracked-files map (filename -> blob id)
//! - The parent commit id (absent only for the root commit)
//! - An optional merge-parent id (present only on merge commits)
//! - Their own id, once sealed
//!
//! ## Format
//!
//! Hashed form:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge-parent <merge-parent-sha>
//! date <timestamp>
//! file <blob-sha> <filename>
//!
//! <commit message>
//! ```
//!
//! The persisted record carries one more body line, `id <sha>`, in first
//! position. The id is computed over the hashed form, which never contains
//! it, so a commit can embed its own id.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// `Thu Jan 1 00:00:00 1970 +0000`
pub const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Filename to blob id, ordered so serialization is canonical
pub type TrackedFiles = BTreeMap<String, ObjectId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Set once the commit has been hashed; never part of the hashed form
    oid: Option<ObjectId>,
    timestamp: String,
    message: String,
    tracked: TrackedFiles,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        message: String,
        tracked: TrackedFiles,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
    ) -> Self {
        Commit {
            oid: None,
            timestamp: timestamp.format(DATE_FORMAT).to_string(),
            message,
            tracked,
            parent,
            merge_parent,
        }
    }

    /// The root commit every history starts from
    ///
    /// Its timestamp is the UNIX epoch in UTC, so its id is the same in every
    /// repository.
    pub fn root() -> Self {
        Commit::new(
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            ROOT_COMMIT_MESSAGE.to_string(),
            TrackedFiles::new(),
            None,
            None,
        )
    }

    /// Compute the content hash and attach it as the commit's id
    pub fn seal(mut self) -> anyhow::Result<Self> {
        self.oid = Some(self.object_id()?);
        Ok(self)
    }

    pub fn oid(&self) -> Option<&ObjectId> {
        self.oid.as_ref()
    }

    /// The id of a sealed commit
    pub fn id(&self) -> anyhow::Result<&ObjectId> {
        self.oid
            .as_ref()
            .context("commit has not been sealed with its id yet")
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn tracked_oid(&self, file_name: &str) -> Option<&ObjectId> {
        self.tracked.get(file_name)
    }

    pub fn tracks(&self, file_name: &str) -> bool {
        self.tracked.contains_key(file_name)
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    /// Persisted form: the hashed form plus the leading `id` line
    pub fn record(&self) -> anyhow::Result<Bytes> {
        let oid = self.id()?;
        Self::with_header(self.object_type(), &self.body(Some(oid))?)
    }

    fn body(&self, oid: Option<&ObjectId>) -> anyhow::Result<String> {
        let mut lines = vec![];

        if let Some(oid) = oid {
            lines.push(format!("id {oid}"));
        }
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge-parent {merge_parent}"));
        }
        lines.push(format!("date {}", self.timestamp));
        for (file_name, blob_oid) in &self.tracked {
            if file_name.contains('\n') {
                anyhow::bail!("file name {file_name:?} cannot be recorded in a commit");
            }
            lines.push(format!("file {blob_oid} {file_name}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(lines.join("\n"))
    }

    fn with_header(object_type: ObjectType, body: &str) -> anyhow::Result<Bytes> {
        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", object_type.as_str(), body.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(body.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Self::with_header(self.object_type(), &self.body(None)?)
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: body is not valid UTF-8")?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut oid = None;
        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut tracked = TrackedFiles::new();

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "id" => oid = Some(ObjectId::try_parse(value.to_string())?),
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge-parent" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "date" => timestamp = Some(value.to_string()),
                "file" => {
                    let (blob_oid, file_name) = value.split_once(' ').with_context(|| {
                        format!("Invalid commit object: malformed file line {line:?}")
                    })?;
                    tracked.insert(
                        file_name.to_string(),
                        ObjectId::try_parse(blob_oid.to_string())?,
                    );
                }
                _ => anyhow::bail!("Invalid commit object: unknown field {key:?}"),
            }
        }

        Ok(Commit {
            oid,
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            message: message.to_string(),
            tracked,
            parent,
            merge_parent,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_commit() -> Commit {
        let tracked = TrackedFiles::from([
            ("f.txt".to_string(), ObjectId::hash(b"This is a wug.")),
            ("g h.txt".to_string(), ObjectId::hash(b"This is not a wug.")),
        ]);
        let date = DateTime::parse_from_rfc3339("2023-01-01T12:00:00+00:00").unwrap();

        Commit::new(
            date,
            "Two files\n\nwith a body".to_string(),
            tracked,
            Some(Commit::root().seal().unwrap().id().unwrap().clone()),
            Some(ObjectId::hash(b"other")),
        )
    }

    fn parse_record(record: Bytes) -> Commit {
        let mut reader = Cursor::new(record);
        let object_type = ObjectType::parse_object_type(&mut reader).unwrap();
        assert_eq!(object_type, ObjectType::Commit);
        Commit::deserialize(reader).unwrap()
    }

    #[test]
    fn root_commit_is_identical_everywhere() {
        let first = Commit::root().seal().unwrap();
        let second = Commit::root().seal().unwrap();

        assert_eq!(first.id().unwrap(), second.id().unwrap());
        assert_eq!(first.timestamp(), "Thu Jan 1 00:00:00 1970 +0000");
        assert_eq!(first.message(), ROOT_COMMIT_MESSAGE);
        assert!(first.tracked().is_empty());
        assert_eq!(first.parent(), None);
    }

    #[test]
    fn record_round_trips_with_embedded_id() {
        let commit = sample_commit().seal().unwrap();

        let restored = parse_record(commit.record().unwrap());

        assert_eq!(restored, commit);
        assert!(restored.is_merge());
    }

    #[test]
    fn embedded_id_is_hash_of_record_without_id() {
        let commit = sample_commit().seal().unwrap();
        let restored = parse_record(commit.record().unwrap());

        let rehashed = ObjectId::hash(&restored.serialize().unwrap());

        assert_eq!(Some(&rehashed), restored.oid());
    }

    #[test]
    fn hashed_form_never_contains_the_id() {
        let commit = sample_commit().seal().unwrap();
        let hashed = commit.serialize().unwrap();

        let hashed = String::from_utf8_lossy(&hashed);
        assert!(!hashed.contains("\nid "));
        assert!(!hashed.contains(commit.id().unwrap().as_ref()));
    }

    #[test]
    fn unsealed_commit_has_no_record() {
        assert!(sample_commit().record().is_err());
    }

    #[test]
    fn empty_messages_survive_serialization() {
        let commit = Commit::new(
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            String::new(),
            TrackedFiles::new(),
            None,
            None,
        )
        .seal()
        .unwrap();

        assert_eq!(parse_record(commit.record().unwrap()).message(), "");
    }
}
