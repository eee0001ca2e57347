//! Object store
//!
//! Content-addressed persistence for blobs and commits. Each kind lives in
//! its own shard space under the repository marker directory:
//!
//! - `blobs/<2-hex>/<38-hex>`: raw file bytes
//! - `commits/<2-hex>/<38-hex>`: zlib-compressed commit records
//!
//! Objects are write-once. Storing bytes that already exist under the same
//! id is a no-op, so deduplication falls out of the addressing scheme.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHARD_LENGTH};
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the empty shard spaces
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let dir = self.kind_path(object_type);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;
        self.store(ObjectType::Blob, &oid, blob.serialize()?)?;

        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let object_path = self.object_path(ObjectType::Blob, oid);
        let content = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read blob file {}", object_path.display()))?;

        Blob::deserialize(Cursor::new(content))
    }

    /// Seal the commit with its content hash and persist the record
    ///
    /// Returns the sealed commit so callers can read its id.
    pub fn store_commit(&self, commit: Commit) -> anyhow::Result<Commit> {
        let commit = commit.seal()?;
        let oid = commit.id()?;
        let record = Self::compress(commit.record()?)?;

        self.store(ObjectType::Commit, oid, record)?;

        Ok(commit)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let object_path = self.object_path(ObjectType::Commit, oid);
        if !object_path.is_file() {
            return Err(RepositoryError::NoCommitWithId.into());
        }

        let content = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read commit file {}", object_path.display()))?;
        let mut reader = Cursor::new(Self::decompress(content.into())?);

        match ObjectType::parse_object_type(&mut reader)? {
            ObjectType::Commit => Commit::deserialize(reader),
            object_type => anyhow::bail!(
                "Corrupt object {}: expected a commit, found a {}",
                oid,
                object_type
            ),
        }
    }

    pub fn has_commit(&self, oid: &ObjectId) -> bool {
        self.object_path(ObjectType::Commit, oid).is_file()
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Prefixes of up to two characters are matched against shard names, and
    /// the single matching shard must hold exactly one commit. Longer prefixes
    /// select the shard by their first two characters and scan its keys.
    pub fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.is_empty()
            || prefix.len() > OBJECT_ID_LENGTH
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(RepositoryError::NoCommitWithId.into());
        }

        if prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(prefix)?;
            return if self.has_commit(&oid) {
                Ok(oid)
            } else {
                Err(RepositoryError::NoCommitWithId.into())
            };
        }

        let mut matches = self.find_objects_by_prefix(ObjectType::Commit, &prefix)?;
        debug!(%prefix, candidates = matches.len(), "resolving commit prefix");

        match matches.len() {
            0 => Err(RepositoryError::NoCommitWithId.into()),
            1 => Ok(matches.remove(0)),
            _ => Err(RepositoryError::AmbiguousId.into()),
        }
    }

    /// Every stored commit, in shard then key order
    pub fn commits(&self) -> anyhow::Result<Vec<Commit>> {
        self.list_objects(ObjectType::Commit)?
            .iter()
            .map(|oid| self.load_commit(oid))
            .collect()
    }

    /// Find all objects of a kind whose id starts with the given prefix
    ///
    /// For prefixes of two characters or fewer every shard whose name starts
    /// with the prefix contributes all of its objects. Otherwise only the shard
    /// named by the first two characters is scanned.
    pub fn find_objects_by_prefix(
        &self,
        object_type: ObjectType,
        prefix: &str,
    ) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() <= SHARD_LENGTH {
            return Ok(self
                .list_objects(object_type)?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(prefix))
                .collect());
        }

        let (shard, key_prefix) = prefix.split_at(SHARD_LENGTH);
        let shard_path = self.kind_path(object_type).join(shard);
        if !shard_path.is_dir() {
            return Ok(vec![]);
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&shard_path)
            .with_context(|| format!("Unable to read shard {}", shard_path.display()))?
        {
            let file_name = entry?.file_name();
            let key = file_name.to_string_lossy();

            if key.starts_with(key_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{shard}{key}"))
            {
                matches.push(oid);
            }
        }
        matches.sort();

        Ok(matches)
    }

    fn list_objects(&self, object_type: ObjectType) -> anyhow::Result<Vec<ObjectId>> {
        let kind_path = self.kind_path(object_type);
        if !kind_path.is_dir() {
            return Ok(vec![]);
        }

        Ok(WalkDir::new(&kind_path)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&kind_path).ok()?;
                let oid: String = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect();
                // temp files left behind by an interrupted write are skipped
                ObjectId::try_parse(oid).ok()
            })
            .collect())
    }

    fn store(&self, object_type: ObjectType, oid: &ObjectId, content: Bytes) -> anyhow::Result<()> {
        let object_path = self.object_path(object_type, oid);

        // write-once: an existing object already holds these exact bytes
        if object_path.exists() {
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        self.write_object(object_path, content)?;
        debug!(kind = %object_type, %oid, "stored object");

        Ok(())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn kind_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    fn object_path(&self, object_type: ObjectType, oid: &ObjectId) -> PathBuf {
        self.kind_path(object_type).join(oid.to_path())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
