//! Suite run reporting types
//!
//! A run produces one [`ScenarioOutcome`] per scenario and aggregates them in
//! a [`SuiteReport`]. Outcomes distinguish failed checks from skipped
//! scenarios so a setup problem is never mistaken for a contract violation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Terminal status of one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde_support",
    serde(tag = "status", rename_all = "lowercase")
)]
pub enum ScenarioStatus {
    /// Every check in the scenario held
    Passed,
    /// A contract check failed or the adapter raised an unexpected fault
    Failed {
        /// Human-readable failure description
        reason: String,
    },
    /// The scenario could not be attempted (construction or setup failure)
    Skipped {
        /// Why the scenario was not attempted
        reason: String,
    },
}

/// Result of a single scenario execution
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Terminal status
    pub status: ScenarioStatus,
}

impl ScenarioOutcome {
    /// Create a passed outcome
    pub fn passed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: ScenarioStatus::Passed,
        }
    }

    /// Create a failed outcome
    pub fn failed(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: ScenarioStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Create a skipped outcome
    pub fn skipped(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: ScenarioStatus::Skipped {
                reason: reason.into(),
            },
        }
    }

    /// Whether the scenario passed
    pub fn is_passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// Whether the scenario failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Failed { .. })
    }

    /// Whether the scenario was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ScenarioStatus::Skipped { .. })
    }
}

/// Aggregated result of one suite run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct SuiteReport {
    /// Unique identifier of this run
    pub run_id: Uuid,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Per-scenario outcomes, in execution order
    pub scenarios: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Create an empty report stamped with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            scenarios: Vec::new(),
        }
    }

    /// Record one scenario outcome
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.scenarios.push(outcome);
    }

    /// Number of passed scenarios
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|o| o.is_passed()).count()
    }

    /// Number of failed scenarios
    pub fn failed(&self) -> usize {
        self.scenarios.iter().filter(|o| o.is_failed()).count()
    }

    /// Number of skipped scenarios
    pub fn skipped(&self) -> usize {
        self.scenarios.iter().filter(|o| o.is_skipped()).count()
    }

    /// Whether every executed scenario passed and none failed or was skipped
    pub fn all_passed(&self) -> bool {
        !self.scenarios.is_empty() && self.scenarios.iter().all(|o| o.is_passed())
    }

    /// The outcomes that did not pass, for diagnostics
    pub fn problems(&self) -> Vec<&ScenarioOutcome> {
        self.scenarios.iter().filter(|o| !o.is_passed()).collect()
    }
}

impl Default for SuiteReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        assert!(ScenarioOutcome::passed("a").is_passed());
        assert!(ScenarioOutcome::failed("b", "boom").is_failed());
        assert!(ScenarioOutcome::skipped("c", "no adapter").is_skipped());
    }

    #[test]
    fn test_report_counts() {
        let mut report = SuiteReport::new();
        report.record(ScenarioOutcome::passed("a"));
        report.record(ScenarioOutcome::failed("b", "boom"));
        report.record(ScenarioOutcome::skipped("c", "setup"));

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.problems().len(), 2);
    }

    #[test]
    fn test_empty_report_is_not_a_pass() {
        let report = SuiteReport::new();
        assert!(!report.all_passed());
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_report_serialization() {
        let mut report = SuiteReport::new();
        report.record(ScenarioOutcome::failed("b", "boom"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("boom"));
    }
}
