// crates/pattern-catalog-core/tests/audit.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for JSON-line audit output from verifier and runner.
// Purpose: Ensure file sinks append one parseable record per event.
// Dependencies: pattern-catalog-core, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Drives [`FileAuditSink`] through the verifier and the example runner.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

#[path = "support/fixtures.rs"]
mod fixtures;
mod support;

use std::fs;

use fixtures::contract;
use fixtures::three_items;
use pattern_catalog_core::ExampleRunner;
use pattern_catalog_core::FileAuditSink;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Registry;
use pattern_catalog_core::Script;
use pattern_catalog_core::Verifier;
use serde_json::Value;
use support::TestResult;
use support::ensure;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registry holding a single iterator entry.
fn registry() -> TestResult<Registry> {
    let mut registry = Registry::new();
    registry.register(
        PatternCategory::Iterator,
        "three-items",
        three_items(),
        contract(PatternCategory::Iterator),
    )?;
    Ok(registry)
}

/// Parses every line of the audit log.
fn read_events(path: &std::path::Path) -> TestResult<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let mut events = Vec::new();
    for line in text.lines() {
        events.push(serde_json::from_str(line)?);
    }
    Ok(events)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn file_sink_appends_verification_and_script_events() -> TestResult {
    let registry = registry()?;
    let dir = TempDir::new()?;
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path)?;

    let report = Verifier::new(&registry).with_audit(&sink).verify(PatternCategory::Iterator, "three-items")?;
    ensure(report.passed(), "builtin iterator fixture should pass")?;
    let script = Script::new().step("next", vec![]);
    let outputs = ExampleRunner::new(&registry).with_audit(&sink).run(PatternCategory::Iterator, "three-items", &script);
    ensure(outputs.is_ok(), "one-step script should succeed")?;

    let events = read_events(&path)?;
    ensure(events.len() == 2, format!("expected two events, got {}", events.len()))?;
    ensure(events[0]["event"] == "pattern_verification", "first event is the verification")?;
    ensure(events[0]["category"] == "iterator", "category is serialized by label")?;
    ensure(events[0]["passed"] == true, "verification event records the pass")?;
    ensure(events[1]["event"] == "pattern_script", "second event is the script run")?;
    ensure(events[1]["outcome"] == "completed", "script outcome is snake case")?;
    ensure(events[1]["completed"] == 1, "one step completed")?;
    Ok(())
}

/// Reopening an existing log keeps earlier lines.
#[test]
fn file_sink_opens_in_append_mode() -> TestResult {
    let registry = registry()?;
    let dir = TempDir::new()?;
    let path = dir.path().join("audit.jsonl");
    for _ in 0..2 {
        let sink = FileAuditSink::new(&path)?;
        let _ = Verifier::new(&registry).with_audit(&sink).verify_all(PatternCategory::Iterator);
    }
    let events = read_events(&path)?;
    ensure(events.len() == 2, format!("expected two appended events, got {}", events.len()))?;
    Ok(())
}

#[test]
fn failed_script_event_carries_the_error() -> TestResult {
    let registry = registry()?;
    let dir = TempDir::new()?;
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path)?;
    let script = (0..4).fold(Script::new(), |script, _| script.step("next", vec![]));
    let result = ExampleRunner::new(&registry).with_audit(&sink).run(PatternCategory::Iterator, "three-items", &script);
    ensure(result.is_err(), "fourth next should fail")?;

    let events = read_events(&path)?;
    ensure(events.len() == 1, "one script event")?;
    ensure(events[0]["outcome"] == "failed", "outcome is failed")?;
    ensure(events[0]["completed"] == 3, "three steps completed before the failure")?;
    ensure(events[0]["error"].as_str().is_some_and(|error| error.contains("step 3")), "error names the step")?;
    Ok(())
}
