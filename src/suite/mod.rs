//! Generic conformance suite for storage adapters
//!
//! Given a factory producing adapter instances, the suite runs a fixed
//! sequence of scenarios covering the whole [`StorageAdapter`] contract and
//! reports per-scenario outcomes:
//! - **Harness** - adapter lifecycle, store emptying, bounded retry
//! - **Scenarios** - the fixed, self-contained assertion sequence
//! - **Checks** - non-panicking assertion helpers with hex byte diffs
//! - **Fixtures** - the binary reference inputs
//! - **Report** - per-scenario outcomes and aggregate counts
//!
//! The suite never hard-codes backend identity: it branches on the adapter's
//! self-reported capability flags, expecting the unsupported-capability fault
//! where a capability is declared absent.
//!
//! # Examples
//!
//! ```rust
//! use storage_conformance::adapter::{MemoryAdapter, StorageAdapter};
//! use storage_conformance::suite::ConformanceSuite;
//!
//! let mut suite = ConformanceSuite::new(|| {
//!     Ok(Box::new(MemoryAdapter::new()) as Box<dyn StorageAdapter>)
//! });
//!
//! let report = suite.run();
//! assert!(report.all_passed());
//! ```
//!
//! [`StorageAdapter`]: crate::adapter::StorageAdapter

pub mod check;
pub mod fixtures;
pub mod harness;
pub mod report;
pub mod scenarios;

// Re-export main types for convenience
pub use fixtures::Fixtures;
pub use harness::{
    with_retry, AdapterFactory, ConformanceSuite, HarnessState, ScenarioContext, SuiteConfig,
    DEFAULT_MAX_RETRIES,
};
pub use report::{ScenarioOutcome, ScenarioStatus, SuiteReport};
pub use scenarios::Scenario;
