//! Assertion helpers for conformance scenarios
//!
//! Checks return [`SuiteError::CheckFailed`] instead of panicking so the
//! harness can classify the outcome and keep running the remaining
//! scenarios. Byte payload mismatches render as hex for diagnosis.

use crate::error::{AdapterError, AdapterResult, SuiteError, SuiteResult};
use std::fmt::Debug;

/// Require a condition to hold
pub fn check(condition: bool, reason: impl Into<String>) -> SuiteResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::CheckFailed {
            reason: reason.into(),
        })
    }
}

/// Require two values to compare equal, reporting both on mismatch
pub fn check_eq<T: PartialEq + Debug>(actual: T, expected: T, context: &str) -> SuiteResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SuiteError::CheckFailed {
            reason: format!(
                "{}: expected {:?}, got {:?}",
                context, expected, actual
            ),
        })
    }
}

/// Require two byte payloads to compare equal, reporting both as hex
pub fn check_bytes_equal(actual: &[u8], expected: &[u8], context: &str) -> SuiteResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SuiteError::CheckFailed {
            reason: format!(
                "{}: payloads differ ({} vs {} bytes)\nexpected (hex): {}\nactual (hex):   {}",
                context,
                expected.len(),
                actual.len(),
                hex::encode(expected),
                hex::encode(actual)
            ),
        })
    }
}

/// Require a query to have found an entry, unwrapping the sentinel
pub fn require_found<T>(value: Option<T>, context: &str) -> SuiteResult<T> {
    value.ok_or_else(|| SuiteError::CheckFailed {
        reason: format!("{}: expected an entry, got the not-found sentinel", context),
    })
}

/// Require an operation to raise the unsupported-capability fault
///
/// Any other outcome, including a clean result, fails the check: an adapter
/// without the capability must never silently no-op.
pub fn expect_unsupported<T: Debug>(result: AdapterResult<T>, operation: &str) -> SuiteResult<()> {
    match result {
        Err(AdapterError::UnsupportedCapability { .. }) => Ok(()),
        Err(other) => Err(SuiteError::CheckFailed {
            reason: format!(
                "{}: expected the unsupported-capability fault, got fault: {}",
                operation, other
            ),
        }),
        Ok(value) => Err(SuiteError::CheckFailed {
            reason: format!(
                "{}: expected the unsupported-capability fault, got {:?}",
                operation, value
            ),
        }),
    }
}
