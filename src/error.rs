//! Error types for the storage conformance library
//!
//! This module provides a unified error handling system using `thiserror` for
//! both sides of the crate: adapter operations and the conformance harness.
//!
//! Expected absence is not an error. Read-type queries against a missing path
//! return `Ok(None)`; only genuine faults (backend failures, invalid paths,
//! unsupported capabilities) surface through these types.

use thiserror::Error;

/// The main error type for the storage conformance library
#[derive(Error, Debug)]
pub enum Error {
    /// Adapter operation errors
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Conformance suite errors
    #[error("Suite error: {0}")]
    Suite(#[from] SuiteError),

    /// Invalid input data
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable description of the invalid input
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {message}")]
    Other {
        /// Human-readable description of the error
        message: String,
    },
}

/// Adapter-specific error types
///
/// These are the faults an adapter is allowed to raise. A missing path is
/// never one of them; see the module docs.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Path failed normalization or validation
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The path that failed validation
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// Operation outside the adapter's declared capability set
    #[error("Unsupported capability: {operation}")]
    UnsupportedCapability {
        /// The operation that is not supported
        operation: String,
    },

    /// Adapter operation failed
    #[error("Adapter operation failed: {operation}: {reason}")]
    OperationFailed {
        /// The operation that failed
        operation: String,
        /// Why the operation failed
        reason: String,
    },

    /// Payload exceeds the adapter's configured size limit
    #[error("Payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        /// The size of the offending payload, in bytes
        size: u64,
        /// The configured size limit, in bytes
        limit: u64,
    },
}

/// Suite-specific error types
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Adapter factory failed to produce an instance
    #[error("Adapter construction failed: {reason}")]
    AdapterConstruction {
        /// Why construction failed
        reason: String,
    },

    /// Pre-scenario provisioning or cleanup failed
    #[error("Scenario setup failed: {reason}")]
    SetupFailed {
        /// Why setup failed
        reason: String,
    },

    /// A contract assertion did not hold
    #[error("Check failed: {reason}")]
    CheckFailed {
        /// Why the check failed
        reason: String,
    },

    /// Bounded retry exhausted its attempts
    #[error("Operation '{operation}' still failing after {attempts} attempts")]
    RetriesExhausted {
        /// The operation that kept failing
        operation: String,
        /// How many attempts were made
        attempts: u32,
    },
}

impl From<AdapterError> for SuiteError {
    fn from(err: AdapterError) -> Self {
        SuiteError::CheckFailed {
            reason: format!("adapter fault: {err}"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Adapter Results
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Convenience type alias for Suite Results
pub type SuiteResult<T> = std::result::Result<T, SuiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let adapter_error = AdapterError::InvalidPath {
            path: "../escape".to_string(),
            reason: "parent traversal".to_string(),
        };
        let error = Error::Adapter(adapter_error);
        assert!(error.to_string().contains("Adapter error"));
        assert!(error.to_string().contains("Invalid path"));
    }

    #[test]
    fn test_unsupported_capability_display() {
        let error = AdapterError::UnsupportedCapability {
            operation: "visibility_of".to_string(),
        };
        assert!(error.to_string().contains("Unsupported capability"));
        assert!(error.to_string().contains("visibility_of"));
    }

    #[test]
    fn test_suite_error_from_adapter_error() {
        let adapter_error = AdapterError::OperationFailed {
            operation: "write".to_string(),
            reason: "disk full".to_string(),
        };
        let suite_error = SuiteError::from(adapter_error);
        assert!(suite_error.to_string().contains("adapter fault"));
        assert!(suite_error.to_string().contains("disk full"));
    }
}
