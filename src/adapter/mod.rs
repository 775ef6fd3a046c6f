//! Storage adapter contract and reference implementation
//!
//! This module defines the behavioral contract every storage backend must
//! satisfy, together with an in-memory reference implementation:
//! - **Contract** - the [`StorageAdapter`] trait and its data model
//! - **Path handling** - normalization and validation of adapter paths
//! - **MIME detection** - extension-based content type lookup
//! - **Memory backend** - the reference adapter backing the conformance suite
//!
//! The contract follows a trait-based design allowing for pluggable backends
//! with consistent semantics across storage types.
//!
//! # Features
//!
//! - Synchronous, object-safe operation set
//! - Sentinel-based absence reporting (`Ok(None)`, never a raised fault)
//! - Optional visibility capability, declared up front per adapter
//! - Literal treatment of special characters in paths
//!
//! # Examples
//!
//! ```rust
//! use storage_conformance::adapter::{MemoryAdapter, StorageAdapter, WriteOptions};
//! use bytes::Bytes;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = MemoryAdapter::new();
//!
//! // Store data
//! storage.write("greeting.txt", Bytes::from("Hello, World!"), &WriteOptions::default())?;
//!
//! // Retrieve data
//! let contents = storage.read("greeting.txt")?;
//! assert_eq!(contents, Some(Bytes::from("Hello, World!")));
//!
//! // Check existence
//! assert!(storage.has("greeting.txt")?);
//!
//! // Delete data
//! storage.delete("greeting.txt")?;
//! # Ok(())
//! # }
//! ```

// Contract and shared data model
pub mod contract;

// Path and content type handling
pub mod mime;
pub mod path;

// Reference backend
pub mod memory;

// Re-export main types for convenience
pub use contract::{
    Capabilities, EntryKind, EntryMetadata, StorageAdapter, Visibility, WriteOptions,
};
pub use memory::{MemoryAdapter, MemoryConfig};

/// Adapter constants
pub mod constants {
    //! Constants used throughout the adapter module

    /// Maximum adapter path length
    pub const MAX_PATH_LENGTH: usize = 1024;

    /// Default maximum file size (1GB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_constants() {
        assert_eq!(constants::MAX_PATH_LENGTH, 1024);
        assert_eq!(constants::DEFAULT_MAX_FILE_SIZE, 1024 * 1024 * 1024);
    }

    #[test]
    fn test_adapter_as_trait_object() {
        let storage: Box<dyn StorageAdapter> = Box::new(MemoryAdapter::new());

        storage
            .write("object/safe.txt", Bytes::from("ok"), &WriteOptions::default())
            .unwrap();
        assert!(storage.has("object/safe.txt").unwrap());
        assert!(storage.capabilities().visibility);
    }
}
