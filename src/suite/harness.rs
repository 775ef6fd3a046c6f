//! Conformance harness: adapter lifecycle and scenario execution
//!
//! The harness owns the adapter factory hook, creates the adapter lazily and
//! memoizes it for the remainder of the run, and empties the backing store
//! before every scenario so no scenario observes leftover state. A factory
//! fault downgrades scenarios to skipped rather than cascading into false
//! negatives.

use crate::adapter::{StorageAdapter, WriteOptions};
use crate::error::{AdapterResult, SuiteError, SuiteResult};
use crate::suite::fixtures::Fixtures;
use crate::suite::report::{ScenarioOutcome, ScenarioStatus, SuiteReport};
use crate::suite::scenarios::{self, Scenario};
use bytes::Bytes;
use tracing::{debug, info, warn};

/// Default retry attempts for flaky backend operations
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Factory hook producing ready adapter instances
///
/// The only required integration point: whoever tests a backend supplies a
/// no-argument constructor for it.
pub type AdapterFactory = Box<dyn Fn() -> AdapterResult<Box<dyn StorageAdapter>>>;

/// Harness configuration
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Maximum attempts for retried operations
    pub max_retries: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Lifecycle phase of the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// No adapter instance exists yet
    Uninitialized,
    /// An adapter instance is memoized and idle
    AdapterReady,
    /// A scenario is executing against the adapter
    ScenarioRunning,
    /// Post-scenario cleanup is in progress
    Cleanup,
    /// The harness released its adapter instance
    TornDown,
}

/// Everything a scenario needs to exercise the adapter under test
pub struct ScenarioContext<'a> {
    /// The adapter under test
    pub adapter: &'a dyn StorageAdapter,
    /// Binary reference inputs
    pub fixtures: &'a Fixtures,
    /// Harness configuration
    pub config: &'a SuiteConfig,
}

impl ScenarioContext<'_> {
    /// Run an operation under the harness's bounded retry policy
    pub fn retry<T, F>(&self, operation: &str, f: F) -> SuiteResult<T>
    where
        F: FnMut() -> AdapterResult<T>,
    {
        with_retry(operation, self.config.max_retries, f)
    }

    /// Provision fixture state for a scenario
    ///
    /// A provisioning failure is a setup signal: the scenario is skipped, not
    /// failed.
    pub fn provision(
        &self,
        path: &str,
        contents: &Bytes,
        options: &WriteOptions,
    ) -> SuiteResult<()> {
        self.retry("provision write", || {
            self.adapter.write(path, contents.clone(), options)
        })
        .map_err(|e| SuiteError::SetupFailed {
            reason: format!("could not provision '{}': {}", path, e),
        })
    }

    /// Provision a fixture directory for a scenario
    pub fn provision_dir(&self, path: &str) -> SuiteResult<()> {
        self.retry("provision directory", || {
            self.adapter.create_dir(path, &WriteOptions::default())
        })
        .map_err(|e| SuiteError::SetupFailed {
            reason: format!("could not provision directory '{}': {}", path, e),
        })
    }
}

/// Retry wrapper for flaky backend operations
///
/// A fixed number of attempts, no backoff; retries tolerate transient backend
/// errors, they provide no concurrency.
pub fn with_retry<T, F>(operation: &str, max_attempts: u32, mut f: F) -> SuiteResult<T>
where
    F: FnMut() -> AdapterResult<T>,
{
    let attempts = max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match f() {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(operation, attempt, error = %e, "attempt failed");
                last_error = Some(e);
            }
        }
    }

    if let Some(e) = last_error {
        warn!(operation, attempts, error = %e, "retries exhausted");
    }
    Err(SuiteError::RetriesExhausted {
        operation: operation.to_string(),
        attempts,
    })
}

/// Generic conformance suite over a storage adapter factory
///
/// Runs a fixed sequence of scenarios against adapter instances produced by
/// the factory and reports per-scenario outcomes.
pub struct ConformanceSuite {
    factory: AdapterFactory,
    config: SuiteConfig,
    fixtures: Fixtures,
    adapter: Option<Box<dyn StorageAdapter>>,
    state: HarnessState,
}

impl ConformanceSuite {
    /// Create a suite over an adapter factory
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> AdapterResult<Box<dyn StorageAdapter>> + 'static,
    {
        Self {
            factory: Box::new(factory),
            config: SuiteConfig::default(),
            fixtures: Fixtures::default(),
            adapter: None,
            state: HarnessState::Uninitialized,
        }
    }

    /// Replace the harness configuration
    pub fn with_config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the binary reference inputs
    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// Explicitly install an adapter instance, replacing the memoized one
    pub fn use_adapter(&mut self, adapter: Box<dyn StorageAdapter>) {
        self.adapter = Some(adapter);
        self.state = HarnessState::AdapterReady;
    }

    /// Release the adapter instance; the next run creates a fresh one
    pub fn teardown(&mut self) {
        self.adapter = None;
        self.state = HarnessState::TornDown;
    }

    /// Current lifecycle phase
    pub fn state(&self) -> HarnessState {
        self.state
    }

    fn ensure_adapter(&mut self) -> SuiteResult<()> {
        if self.adapter.is_none() {
            debug!("creating adapter instance");
            let adapter = (self.factory)().map_err(|e| SuiteError::AdapterConstruction {
                reason: e.to_string(),
            })?;
            self.adapter = Some(adapter);
        }
        self.state = HarnessState::AdapterReady;
        Ok(())
    }

    /// Empty the backing store: enumerate top-level entries, recursively
    /// delete directories, delete files
    fn clear_storage(
        adapter: &dyn StorageAdapter,
        max_retries: u32,
    ) -> SuiteResult<()> {
        with_retry("clear storage", max_retries, || {
            for entry in adapter.list_contents("", false)? {
                if entry.is_dir() {
                    adapter.delete_dir(&entry.path)?;
                } else {
                    adapter.delete(&entry.path)?;
                }
            }
            Ok(())
        })
        .map_err(|e| SuiteError::SetupFailed {
            reason: format!("could not empty the backing store: {}", e),
        })
    }

    /// Run the fixed scenario sequence and collect a report
    pub fn run(&mut self) -> SuiteReport {
        let scenarios = scenarios::all();
        let mut report = SuiteReport::new();
        info!(
            run_id = %report.run_id,
            scenario_count = scenarios.len(),
            "starting conformance run"
        );

        for scenario in &scenarios {
            let outcome = self.run_scenario(scenario);
            match &outcome.status {
                ScenarioStatus::Passed => {
                    debug!(scenario = outcome.name, "scenario passed");
                }
                ScenarioStatus::Failed { reason } => {
                    warn!(scenario = outcome.name, reason, "scenario failed");
                }
                ScenarioStatus::Skipped { reason } => {
                    info!(scenario = outcome.name, reason, "scenario skipped");
                }
            }
            report.record(outcome);
        }

        info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "conformance run finished"
        );
        report
    }

    /// Run a single scenario through the full lifecycle
    pub fn run_scenario(&mut self, scenario: &Scenario) -> ScenarioOutcome {
        if let Err(err) = self.ensure_adapter() {
            // Construction fault: skip gracefully, including cleanup
            return ScenarioOutcome::skipped(scenario.name, err.to_string());
        }
        let adapter = match self.adapter.as_deref() {
            Some(adapter) => adapter,
            None => return ScenarioOutcome::skipped(scenario.name, "adapter unavailable"),
        };

        if let Err(err) = Self::clear_storage(adapter, self.config.max_retries) {
            return ScenarioOutcome::skipped(scenario.name, err.to_string());
        }

        self.state = HarnessState::ScenarioRunning;
        let ctx = ScenarioContext {
            adapter,
            fixtures: &self.fixtures,
            config: &self.config,
        };
        let result = (scenario.run)(&ctx);

        self.state = HarnessState::Cleanup;
        if let Err(err) = Self::clear_storage(adapter, self.config.max_retries) {
            warn!(scenario = scenario.name, error = %err, "post-scenario cleanup failed");
        }
        self.state = HarnessState::AdapterReady;

        match result {
            Ok(()) => ScenarioOutcome::passed(scenario.name),
            Err(SuiteError::SetupFailed { reason }) => {
                ScenarioOutcome::skipped(scenario.name, reason)
            }
            Err(err) => ScenarioOutcome::failed(scenario.name, err.to_string()),
        }
    }
}
