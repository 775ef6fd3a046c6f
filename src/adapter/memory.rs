//! In-memory reference implementation of the storage adapter contract
//!
//! This adapter keeps the full namespace in process memory behind an
//! `Arc<RwLock<..>>`, which makes it the reference backend for exercising the
//! conformance suite and a drop-in store for tests. Cloning the adapter
//! shares the underlying namespace.

use crate::adapter::contract::{
    Capabilities, EntryKind, EntryMetadata, StorageAdapter, Visibility, WriteOptions,
};
use crate::adapter::constants::DEFAULT_MAX_FILE_SIZE;
use crate::adapter::{mime, path};
use crate::error::{AdapterError, AdapterResult};
use bytes::{Buf, Bytes};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, RwLock};

/// Memory adapter configuration
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Maximum file size (bytes)
    pub max_file_size: u64,
    /// Whether the adapter reports the visibility capability
    pub supports_visibility: bool,
    /// Visibility assigned when a write does not request one
    pub default_visibility: Visibility,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            supports_visibility: true,
            default_visibility: Visibility::Public,
        }
    }
}

#[derive(Debug, Clone)]
struct FileEntry {
    contents: Bytes,
    visibility: Visibility,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct DirEntry {
    visibility: Visibility,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<String, FileEntry>,
    dirs: HashMap<String, DirEntry>,
}

/// In-memory storage adapter
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
    config: MemoryConfig,
    state: Arc<RwLock<MemoryState>>,
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAdapter {
    /// Create a new memory adapter with the default configuration
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::default())
    }

    /// Create a new memory adapter with a specific configuration
    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    /// Configuration of this adapter
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    fn guard_visibility(&self, operation: &str) -> AdapterResult<()> {
        if self.config.supports_visibility {
            Ok(())
        } else {
            Err(AdapterError::UnsupportedCapability {
                operation: operation.to_string(),
            })
        }
    }

    fn reported_visibility(&self, visibility: Visibility) -> Option<Visibility> {
        self.config.supports_visibility.then_some(visibility)
    }

    fn file_metadata(&self, path: &str, entry: &FileEntry) -> EntryMetadata {
        EntryMetadata {
            kind: EntryKind::File,
            path: path.to_string(),
            size: Some(entry.contents.len() as u64),
            last_modified: Some(entry.last_modified),
            visibility: self.reported_visibility(entry.visibility),
            mimetype: mime::detect(path),
        }
    }

    fn dir_metadata(&self, path: &str, entry: &DirEntry) -> EntryMetadata {
        EntryMetadata {
            kind: EntryKind::Directory,
            path: path.to_string(),
            size: None,
            last_modified: Some(entry.last_modified),
            visibility: self.reported_visibility(entry.visibility),
            mimetype: None,
        }
    }

    fn ensure_parent_dirs(&self, state: &mut MemoryState, path: &str) {
        for ancestor in path::ancestors(path) {
            state.dirs.entry(ancestor).or_insert_with(|| DirEntry {
                visibility: self.config.default_visibility,
                last_modified: Utc::now(),
            });
        }
    }

    fn store_file(
        &self,
        state: &mut MemoryState,
        path: String,
        contents: Bytes,
        visibility: Visibility,
    ) -> AdapterResult<()> {
        if contents.len() as u64 > self.config.max_file_size {
            return Err(AdapterError::PayloadTooLarge {
                size: contents.len() as u64,
                limit: self.config.max_file_size,
            });
        }
        if state.dirs.contains_key(&path) {
            return Err(AdapterError::OperationFailed {
                operation: "write".to_string(),
                reason: format!("a directory exists at '{}'", path),
            });
        }

        self.ensure_parent_dirs(state, &path);
        state.files.insert(
            path,
            FileEntry {
                contents,
                visibility,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }
}

impl StorageAdapter for MemoryAdapter {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            visibility: self.config.supports_visibility,
        }
    }

    fn write(&self, path: &str, contents: Bytes, options: &WriteOptions) -> AdapterResult<()> {
        let path = path::normalize_entry(path)?;
        let visibility = options.visibility.unwrap_or(self.config.default_visibility);

        let mut state = self.state.write().unwrap();
        self.store_file(&mut state, path, contents, visibility)
    }

    fn write_stream(
        &self,
        path: &str,
        contents: &mut dyn Read,
        options: &WriteOptions,
    ) -> AdapterResult<()> {
        let mut buffer = Vec::new();
        contents
            .read_to_end(&mut buffer)
            .map_err(|e| AdapterError::OperationFailed {
                operation: "write_stream".to_string(),
                reason: format!("failed to drain source stream: {}", e),
            })?;

        self.write(path, Bytes::from(buffer), options)
    }

    fn read(&self, path: &str) -> AdapterResult<Option<Bytes>> {
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        Ok(state.files.get(&path).map(|entry| entry.contents.clone()))
    }

    fn read_stream(&self, path: &str) -> AdapterResult<Option<Box<dyn Read + Send>>> {
        let contents = self.read(path)?;
        Ok(contents.map(|bytes| Box::new(bytes.reader()) as Box<dyn Read + Send>))
    }

    fn has(&self, path: &str) -> AdapterResult<bool> {
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        Ok(state.files.contains_key(&path) || state.dirs.contains_key(&path))
    }

    fn delete(&self, path: &str) -> AdapterResult<()> {
        let path = path::normalize_entry(path)?;

        let mut state = self.state.write().unwrap();
        state.files.remove(&path);
        Ok(())
    }

    fn delete_dir(&self, path: &str) -> AdapterResult<()> {
        let path = path::normalize_entry(path)?;

        let mut state = self.state.write().unwrap();
        state.dirs.remove(&path);
        state.dirs.retain(|key, _| !path::is_descendant(&path, key));
        state.files.retain(|key, _| !path::is_descendant(&path, key));
        Ok(())
    }

    fn create_dir(&self, path: &str, options: &WriteOptions) -> AdapterResult<()> {
        let path = path::normalize_entry(path)?;
        let visibility = options.visibility.unwrap_or(self.config.default_visibility);

        let mut state = self.state.write().unwrap();
        if state.files.contains_key(&path) {
            return Err(AdapterError::OperationFailed {
                operation: "create_dir".to_string(),
                reason: format!("a file exists at '{}'", path),
            });
        }

        self.ensure_parent_dirs(&mut state, &path);
        // Idempotent: an existing directory keeps its entry untouched
        state.dirs.entry(path).or_insert_with(|| DirEntry {
            visibility,
            last_modified: Utc::now(),
        });
        Ok(())
    }

    fn copy(&self, source: &str, destination: &str) -> AdapterResult<bool> {
        let source = path::normalize_entry(source)?;
        let destination = path::normalize_entry(destination)?;

        let mut state = self.state.write().unwrap();
        let entry = match state.files.get(&source) {
            Some(entry) => entry.clone(),
            None => return Ok(false),
        };

        self.store_file(&mut state, destination, entry.contents, entry.visibility)?;
        Ok(true)
    }

    fn rename(&self, source: &str, destination: &str) -> AdapterResult<bool> {
        let source = path::normalize_entry(source)?;
        let destination = path::normalize_entry(destination)?;

        let mut state = self.state.write().unwrap();
        let entry = match state.files.get(&source) {
            Some(entry) => entry.clone(),
            None => return Ok(false),
        };
        if source == destination {
            return Ok(true);
        }

        self.store_file(&mut state, destination, entry.contents, entry.visibility)?;
        state.files.remove(&source);
        Ok(true)
    }

    fn list_contents(&self, path: &str, recursive: bool) -> AdapterResult<Vec<EntryMetadata>> {
        let path = path::normalize(path)?;

        let state = self.state.read().unwrap();
        let mut entries = Vec::new();

        if recursive {
            // Recursive listings enumerate descendant files only
            for (key, entry) in &state.files {
                if path::is_descendant(&path, key) {
                    entries.push(self.file_metadata(key, entry));
                }
            }
        } else {
            for (key, entry) in &state.files {
                if path::is_direct_child(&path, key) {
                    entries.push(self.file_metadata(key, entry));
                }
            }
            for (key, entry) in &state.dirs {
                if path::is_direct_child(&path, key) {
                    entries.push(self.dir_metadata(key, entry));
                }
            }
        }

        Ok(entries)
    }

    fn size_of(&self, path: &str) -> AdapterResult<Option<u64>> {
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        Ok(state
            .files
            .get(&path)
            .map(|entry| entry.contents.len() as u64))
    }

    fn timestamp_of(&self, path: &str) -> AdapterResult<Option<DateTime<Utc>>> {
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        if let Some(entry) = state.files.get(&path) {
            return Ok(Some(entry.last_modified));
        }
        Ok(state.dirs.get(&path).map(|entry| entry.last_modified))
    }

    fn mimetype_of(&self, path: &str) -> AdapterResult<Option<String>> {
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        if !state.files.contains_key(&path) {
            return Ok(None);
        }
        Ok(mime::detect(&path))
    }

    fn visibility_of(&self, path: &str) -> AdapterResult<Option<Visibility>> {
        self.guard_visibility("visibility_of")?;
        let path = path::normalize_entry(path)?;

        let state = self.state.read().unwrap();
        if let Some(entry) = state.files.get(&path) {
            return Ok(Some(entry.visibility));
        }
        Ok(state.dirs.get(&path).map(|entry| entry.visibility))
    }

    fn set_visibility(
        &self,
        path: &str,
        visibility: Visibility,
    ) -> AdapterResult<Option<EntryMetadata>> {
        self.guard_visibility("set_visibility")?;
        let path = path::normalize_entry(path)?;

        let mut state = self.state.write().unwrap();
        if let Some(entry) = state.files.get_mut(&path) {
            entry.visibility = visibility;
            let metadata = self.file_metadata(&path, entry);
            return Ok(Some(metadata));
        }
        if let Some(entry) = state.dirs.get_mut(&path) {
            entry.visibility = visibility;
            let metadata = self.dir_metadata(&path, entry);
            return Ok(Some(metadata));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_memory_config_default() {
        let config = MemoryConfig::default();
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert!(config.supports_visibility);
        assert_eq!(config.default_visibility, Visibility::Public);
    }

    #[test]
    fn test_write_and_read() {
        let storage = MemoryAdapter::new();
        let data = Bytes::from("Hello, World!");

        storage
            .write("test/file.txt", data.clone(), &WriteOptions::default())
            .unwrap();
        let retrieved = storage.read("test/file.txt").unwrap();

        assert_eq!(retrieved, Some(data));
    }

    #[test]
    fn test_read_missing_path_is_sentinel() {
        let storage = MemoryAdapter::new();
        assert_eq!(storage.read("never/written.txt").unwrap(), None);
        assert!(!storage.has("never/written.txt").unwrap());
        assert_eq!(storage.size_of("never/written.txt").unwrap(), None);
        assert_eq!(storage.timestamp_of("never/written.txt").unwrap(), None);
        assert_eq!(storage.mimetype_of("never/written.txt").unwrap(), None);
    }

    #[test]
    fn test_special_characters_round_trip() {
        let storage = MemoryAdapter::new();
        let data = Bytes::from("contents");

        storage
            .write("some/file[name].txt", data.clone(), &WriteOptions::default())
            .unwrap();
        assert_eq!(storage.read("some/file[name].txt").unwrap(), Some(data));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let storage = MemoryAdapter::new();
        storage
            .write("deeply/nested/file.txt", Bytes::from("x"), &WriteOptions::default())
            .unwrap();

        assert!(storage.has("deeply").unwrap());
        assert!(storage.has("deeply/nested").unwrap());
    }

    #[test]
    fn test_write_stream_and_empty_stream() {
        let storage = MemoryAdapter::new();

        let mut source = Cursor::new(b"streamed contents".to_vec());
        storage
            .write_stream("streamed.txt", &mut source, &WriteOptions::default())
            .unwrap();
        assert_eq!(
            storage.read("streamed.txt").unwrap(),
            Some(Bytes::from("streamed contents"))
        );

        let mut empty = Cursor::new(Vec::new());
        storage
            .write_stream("empty.txt", &mut empty, &WriteOptions::default())
            .unwrap();
        assert_eq!(storage.size_of("empty.txt").unwrap(), Some(0));
    }

    #[test]
    fn test_read_stream_is_consumable() {
        let storage = MemoryAdapter::new();
        storage
            .write("file.txt", Bytes::from("stream me"), &WriteOptions::default())
            .unwrap();

        let mut stream = storage.read_stream("file.txt").unwrap().unwrap();
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).unwrap();
        drop(stream);

        assert_eq!(buffer, b"stream me");
        assert!(storage.read_stream("missing.txt").unwrap().is_none());
    }

    #[test]
    fn test_delete_is_noop_for_missing_file() {
        let storage = MemoryAdapter::new();
        storage.delete("not/there.txt").unwrap();

        storage
            .write("there.txt", Bytes::from("x"), &WriteOptions::default())
            .unwrap();
        storage.delete("there.txt").unwrap();
        assert!(!storage.has("there.txt").unwrap());
    }

    #[test]
    fn test_delete_dir_removes_descendants() {
        let storage = MemoryAdapter::new();
        storage
            .write("dir/a.txt", Bytes::from("a"), &WriteOptions::default())
            .unwrap();
        storage
            .write("dir/sub/b.txt", Bytes::from("b"), &WriteOptions::default())
            .unwrap();
        storage
            .write("dir-sibling.txt", Bytes::from("c"), &WriteOptions::default())
            .unwrap();

        storage.delete_dir("dir").unwrap();

        assert!(!storage.has("dir").unwrap());
        assert!(!storage.has("dir/a.txt").unwrap());
        assert!(!storage.has("dir/sub/b.txt").unwrap());
        assert!(storage.has("dir-sibling.txt").unwrap());

        // Missing directory is a no-op
        storage.delete_dir("dir").unwrap();
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let storage = MemoryAdapter::new();
        storage.create_dir("nested/dir", &WriteOptions::default()).unwrap();
        storage.create_dir("nested/dir", &WriteOptions::default()).unwrap();

        let listing = storage.list_contents("nested", false).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].path, "nested/dir");
        assert!(listing[0].is_dir());
    }

    #[test]
    fn test_copy_overwrites_destination() {
        let storage = MemoryAdapter::new();
        storage
            .write("a.txt", Bytes::from("from a"), &WriteOptions::default())
            .unwrap();
        storage
            .write("b.txt", Bytes::from("from b"), &WriteOptions::default())
            .unwrap();

        assert!(storage.copy("a.txt", "b.txt").unwrap());
        assert_eq!(storage.read("b.txt").unwrap(), Some(Bytes::from("from a")));
        assert_eq!(storage.read("a.txt").unwrap(), Some(Bytes::from("from a")));

        assert!(!storage.copy("missing.txt", "c.txt").unwrap());
        assert!(!storage.has("c.txt").unwrap());
    }

    #[test]
    fn test_rename_moves_contents() {
        let storage = MemoryAdapter::new();
        storage
            .write("old.txt", Bytes::from("payload"), &WriteOptions::default())
            .unwrap();

        assert!(storage.rename("old.txt", "new.txt").unwrap());
        assert!(!storage.has("old.txt").unwrap());
        assert_eq!(storage.read("new.txt").unwrap(), Some(Bytes::from("payload")));

        assert!(!storage.rename("old.txt", "other.txt").unwrap());
        assert!(!storage.has("other.txt").unwrap());
    }

    #[test]
    fn test_listing_partition() {
        let storage = MemoryAdapter::new();
        storage
            .write("top.txt", Bytes::from("1"), &WriteOptions::default())
            .unwrap();
        storage
            .write("dir/inner.txt", Bytes::from("2"), &WriteOptions::default())
            .unwrap();

        let shallow = storage.list_contents("", false).unwrap();
        assert_eq!(shallow.len(), 2);
        assert_eq!(shallow.iter().filter(|e| e.is_file()).count(), 1);
        assert_eq!(shallow.iter().filter(|e| e.is_dir()).count(), 1);

        let recursive = storage.list_contents("", true).unwrap();
        assert_eq!(recursive.len(), 2);
        assert!(recursive.iter().all(|e| e.is_file()));
    }

    #[test]
    fn test_size_of_directory_is_none() {
        let storage = MemoryAdapter::new();
        storage.create_dir("dir", &WriteOptions::default()).unwrap();
        assert_eq!(storage.size_of("dir").unwrap(), None);
    }

    #[test]
    fn test_visibility_round_trip() {
        let storage = MemoryAdapter::new();
        storage
            .write(
                "secret.txt",
                Bytes::from("x"),
                &WriteOptions::new().with_visibility(Visibility::Private),
            )
            .unwrap();

        assert_eq!(
            storage.visibility_of("secret.txt").unwrap(),
            Some(Visibility::Private)
        );

        let updated = storage
            .set_visibility("secret.txt", Visibility::Public)
            .unwrap()
            .unwrap();
        assert_eq!(updated.visibility, Some(Visibility::Public));
        assert_eq!(
            storage.visibility_of("secret.txt").unwrap(),
            Some(Visibility::Public)
        );

        assert_eq!(storage.set_visibility("missing.txt", Visibility::Public).unwrap(), None);
    }

    #[test]
    fn test_visibility_unsupported_raises() {
        let storage = MemoryAdapter::with_config(MemoryConfig {
            supports_visibility: false,
            ..Default::default()
        });
        assert!(!storage.capabilities().visibility);

        let err = storage.visibility_of("any.txt").unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedCapability { .. }));

        let err = storage
            .set_visibility("any.txt", Visibility::Public)
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedCapability { .. }));
    }

    #[test]
    fn test_payload_too_large() {
        let storage = MemoryAdapter::with_config(MemoryConfig {
            max_file_size: 4,
            ..Default::default()
        });

        let err = storage
            .write("big.txt", Bytes::from("too big"), &WriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, AdapterError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_clone_shares_namespace() {
        let storage = MemoryAdapter::new();
        let alias = storage.clone();

        storage
            .write("shared.txt", Bytes::from("x"), &WriteOptions::default())
            .unwrap();
        assert!(alias.has("shared.txt").unwrap());
    }
}
