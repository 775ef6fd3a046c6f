//! # Storage Conformance Library
//!
//! A behavioral contract for storage adapters, an in-memory reference
//! implementation, and a generic conformance suite that validates any backend
//! against the contract.
//!
//! ## Features
//!
//! - **Adapter Module**: The `StorageAdapter` trait, path and MIME handling,
//!   and the in-memory reference backend
//! - **Suite Module**: The conformance harness, fixed scenario sequence,
//!   fixtures and run reports
//!
//! ## Optional Features
//!
//! - `serde_support`: Serde serialization for metadata records and reports
//!
//! ## Example
//!
//! ```rust
//! use storage_conformance::adapter::{MemoryAdapter, StorageAdapter};
//! use storage_conformance::suite::ConformanceSuite;
//!
//! // Validate the reference backend against the full contract
//! let mut suite = ConformanceSuite::new(|| {
//!     Ok(Box::new(MemoryAdapter::new()) as Box<dyn StorageAdapter>)
//! });
//! let report = suite.run();
//! assert!(report.all_passed());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod adapter;
pub mod error;
pub mod suite;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::adapter::{
        Capabilities, EntryKind, EntryMetadata, MemoryAdapter, StorageAdapter, Visibility,
        WriteOptions,
    };
    pub use crate::error::{AdapterError, AdapterResult, Error, Result, SuiteError, SuiteResult};
    pub use crate::suite::{ConformanceSuite, Fixtures, SuiteConfig, SuiteReport};
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
