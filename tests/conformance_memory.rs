//! Conformance runs against the in-memory reference adapter

use storage_conformance::adapter::{MemoryAdapter, MemoryConfig, StorageAdapter};
use storage_conformance::error::AdapterError;
use storage_conformance::suite::{ConformanceSuite, SuiteReport};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn describe_problems(report: &SuiteReport) -> String {
    report
        .problems()
        .iter()
        .map(|outcome| format!("{}: {:?}", outcome.name, outcome.status))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_full_suite_passes_against_memory_adapter() {
    init_tracing();

    let mut suite =
        ConformanceSuite::new(|| Ok(Box::new(MemoryAdapter::new()) as Box<dyn StorageAdapter>));
    let report = suite.run();

    assert!(report.all_passed(), "{}", describe_problems(&report));
}

#[test]
fn test_full_suite_passes_without_visibility_capability() {
    init_tracing();

    let mut suite = ConformanceSuite::new(|| {
        let adapter = MemoryAdapter::with_config(MemoryConfig {
            supports_visibility: false,
            ..Default::default()
        });
        Ok(Box::new(adapter) as Box<dyn StorageAdapter>)
    });
    let report = suite.run();

    assert!(report.all_passed(), "{}", describe_problems(&report));
}

#[test]
fn test_construction_failure_skips_every_scenario() {
    init_tracing();

    let mut suite = ConformanceSuite::new(|| {
        Err(AdapterError::OperationFailed {
            operation: "connect".to_string(),
            reason: "backend unreachable".to_string(),
        })
    });
    let report = suite.run();

    assert!(!report.scenarios.is_empty());
    assert_eq!(report.skipped(), report.scenarios.len());
    assert_eq!(report.failed(), 0, "{}", describe_problems(&report));
}

#[test]
fn test_broken_adapter_does_not_pass() {
    init_tracing();

    // A zero-byte size cap makes every write fail, which must surface as
    // failed or skipped scenarios rather than silent passes.
    let mut suite = ConformanceSuite::new(|| {
        let adapter = MemoryAdapter::with_config(MemoryConfig {
            max_file_size: 0,
            ..Default::default()
        });
        Ok(Box::new(adapter) as Box<dyn StorageAdapter>)
    });
    let report = suite.run();

    assert!(!report.all_passed());
    assert!(report.failed() > 0);
}

#[test]
fn test_use_adapter_override_runs_against_the_given_instance() {
    init_tracing();

    let shared = MemoryAdapter::new();
    let mut suite = ConformanceSuite::new(|| {
        panic!("factory must not be called once an instance is installed")
    });
    suite.use_adapter(Box::new(shared.clone()));

    let report = suite.run();
    assert!(report.all_passed(), "{}", describe_problems(&report));

    // The post-scenario cleanup leaves the shared namespace empty
    let leftovers = shared.list_contents("", false).expect("listing must work");
    assert!(leftovers.is_empty(), "leftover entries: {:?}", leftovers);
}

#[cfg(feature = "serde_support")]
#[test]
fn test_report_serializes_to_json() {
    init_tracing();

    let mut suite =
        ConformanceSuite::new(|| Ok(Box::new(MemoryAdapter::new()) as Box<dyn StorageAdapter>));
    let report = suite.run();

    let json = serde_json::to_string(&report).expect("report must serialize");
    assert!(json.contains("writing_and_reading_a_file_with_special_characters"));
    assert!(json.contains(&report.run_id.to_string()));
}
