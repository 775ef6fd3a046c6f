//! The storage adapter contract and its shared data model
//!
//! This module defines the `StorageAdapter` trait that every backend must
//! implement, together with the value types flowing through it: visibility
//! hints, entry metadata records, and write options.
//!
//! The contract is synchronous and object-safe. Every operation completes
//! before the next one starts; adapters needing internal locking own that
//! concern themselves.

use crate::error::AdapterResult;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Read;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Access-control hint attached to a stored entry
///
/// Adapters may declare the whole concept unsupported via
/// [`Capabilities::visibility`]; such adapters raise
/// [`AdapterError::UnsupportedCapability`](crate::error::AdapterError::UnsupportedCapability)
/// from every visibility operation instead of silently ignoring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "lowercase"))]
pub enum Visibility {
    /// Readable by anyone
    Public,
    /// Readable by the owner only
    Private,
}

impl Visibility {
    /// String label for the visibility value
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// A regular file
    File,
    /// A directory
    Directory,
}

/// Metadata record describing one filesystem entry
///
/// Produced by read and listing operations; never persisted by the harness.
/// Attribute fields are optional because backends legitimately differ in what
/// they can report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EntryMetadata {
    /// Entry kind
    pub kind: EntryKind,
    /// Normalized path of the entry
    pub path: String,
    /// Size in bytes; undefined for directories
    pub size: Option<u64>,
    /// Last modification time
    pub last_modified: Option<DateTime<Utc>>,
    /// Visibility, when the adapter supports the concept
    pub visibility: Option<Visibility>,
    /// MIME type, when determinable
    pub mimetype: Option<String>,
}

impl EntryMetadata {
    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Options accepted by write-type operations
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Visibility to assign to the written entry
    pub visibility: Option<Visibility>,
}

impl WriteOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a specific visibility for the written entry
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

/// Capability set self-reported by an adapter
///
/// Callers branch on these flags instead of probing backend identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Capabilities {
    /// Whether the adapter supports the visibility concept
    pub visibility: bool,
}

/// The storage adapter contract
///
/// Paths are normalized, forward-slash-separated strings. Bracket, brace, and
/// space characters are ordinary bytes and must round-trip unaltered; they are
/// never pattern syntax.
///
/// Expected absence is a sentinel, not a fault: read-type queries return
/// `Ok(None)` for a missing path, and delete-type mutations on a missing path
/// are no-ops. A missing path must report non-existence consistently across
/// [`has`](StorageAdapter::has), [`read`](StorageAdapter::read),
/// [`size_of`](StorageAdapter::size_of),
/// [`timestamp_of`](StorageAdapter::timestamp_of),
/// [`visibility_of`](StorageAdapter::visibility_of) and
/// [`mimetype_of`](StorageAdapter::mimetype_of).
pub trait StorageAdapter: Send + Sync {
    /// Self-report the adapter's capability set
    fn capabilities(&self) -> Capabilities;

    /// Store contents at a path, creating parent directories as needed
    ///
    /// Overwrites existing content transparently.
    fn write(&self, path: &str, contents: Bytes, options: &WriteOptions) -> AdapterResult<()>;

    /// Store the contents of a byte stream at a path
    ///
    /// Same semantics as [`write`](StorageAdapter::write); an empty stream
    /// produces a zero-length file.
    fn write_stream(
        &self,
        path: &str,
        contents: &mut dyn Read,
        options: &WriteOptions,
    ) -> AdapterResult<()>;

    /// Read the full contents at a path, `None` when absent
    fn read(&self, path: &str) -> AdapterResult<Option<Bytes>>;

    /// Open a readable stream over the contents at a path, `None` when absent
    ///
    /// The returned stream must be fully consumable and then droppable
    /// without leaking resources.
    fn read_stream(&self, path: &str) -> AdapterResult<Option<Box<dyn Read + Send>>>;

    /// Whether a file or directory exists at the path
    fn has(&self, path: &str) -> AdapterResult<bool>;

    /// Delete the file at a path; a missing file is a no-op
    fn delete(&self, path: &str) -> AdapterResult<()>;

    /// Recursively delete a directory and its contents; missing is a no-op
    fn delete_dir(&self, path: &str) -> AdapterResult<()>;

    /// Create a directory, creating parents as needed
    ///
    /// Idempotent: an already-existing directory is not an error and must not
    /// produce duplicate listing entries.
    fn create_dir(&self, path: &str, options: &WriteOptions) -> AdapterResult<()>;

    /// Duplicate a file from source to destination
    ///
    /// Copies contents, and visibility when supported. An existing
    /// destination is overwritten (last write wins). Returns `false` when the
    /// source is absent.
    fn copy(&self, source: &str, destination: &str) -> AdapterResult<bool>;

    /// Move a file from source to destination
    ///
    /// The source no longer exists afterwards. Returns `false` without any
    /// state change when the source is absent.
    fn rename(&self, source: &str, destination: &str) -> AdapterResult<bool>;

    /// List the contents of a directory
    ///
    /// Shallow listing (`recursive == false`) returns the immediate children
    /// only, files and subdirectories as distinct entries, order unspecified.
    /// Recursive listing returns every descendant file. A missing directory
    /// lists as empty.
    fn list_contents(&self, path: &str, recursive: bool) -> AdapterResult<Vec<EntryMetadata>>;

    /// Size in bytes of the file at a path
    ///
    /// `None` for a missing path and for a directory (size is undefined
    /// there).
    fn size_of(&self, path: &str) -> AdapterResult<Option<u64>>;

    /// Last modification time of the entry at a path, `None` when absent
    fn timestamp_of(&self, path: &str) -> AdapterResult<Option<DateTime<Utc>>>;

    /// MIME type of the file at a path
    ///
    /// `None` when the path is absent and also when the type cannot be
    /// determined; an unknown type is never guessed.
    fn mimetype_of(&self, path: &str) -> AdapterResult<Option<String>>;

    /// Visibility of the entry at a path, `None` when absent
    ///
    /// Raises `UnsupportedCapability` when the adapter does not support
    /// visibility.
    fn visibility_of(&self, path: &str) -> AdapterResult<Option<Visibility>>;

    /// Change the visibility of the entry at a path
    ///
    /// Returns the updated metadata record, or `None` when the path is
    /// absent. Raises `UnsupportedCapability` when the adapter does not
    /// support visibility.
    fn set_visibility(
        &self,
        path: &str,
        visibility: Visibility,
    ) -> AdapterResult<Option<EntryMetadata>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_labels() {
        assert_eq!(Visibility::Public.as_str(), "public");
        assert_eq!(Visibility::Private.as_str(), "private");
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    #[test]
    fn test_write_options_builder() {
        let options = WriteOptions::new().with_visibility(Visibility::Private);
        assert_eq!(options.visibility, Some(Visibility::Private));
        assert_eq!(WriteOptions::default().visibility, None);
    }

    #[test]
    fn test_entry_kind_helpers() {
        let entry = EntryMetadata {
            kind: EntryKind::File,
            path: "file.txt".to_string(),
            size: Some(3),
            last_modified: None,
            visibility: None,
            mimetype: None,
        };
        assert!(entry.is_file());
        assert!(!entry.is_dir());
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_visibility_serialization() {
        let json = serde_json::to_string(&Visibility::Public).unwrap();
        assert_eq!(json, "\"public\"");
    }
}
