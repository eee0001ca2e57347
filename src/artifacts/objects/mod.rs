//! Content-addressed objects
//!
//! Two kinds of objects live in the store, each in its own shard space:
//!
//! - **Blob**: raw bytes of one tracked file, hashed as-is
//! - **Commit**: a snapshot record (tracked files, lineage, date, message)
//!
//! Identifiers are SHA-1 digests rendered as 40 lowercase hex characters.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the shard (directory) part of an object path
pub const SHARD_LENGTH: usize = 2;
