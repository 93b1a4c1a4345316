// crates/pattern-catalog-core/tests/runner.rs
// ============================================================================
// Module: Example Runner Tests
// Description: Tests for scripted execution and partial-output failures.
// Purpose: Ensure outputs are captured in order and failures keep partials.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================
//! ## Overview
//! Exercises [`ExampleRunner`] and [`Script`] parsing.

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

use fixtures::contract;
use fixtures::failing_factory;
use fixtures::shared_singleton;
use fixtures::three_items;
use pattern_catalog_core::ExampleRunner;
use pattern_catalog_core::InMemoryAuditSink;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RegistryError;
use pattern_catalog_core::RunError;
use pattern_catalog_core::RunnerLimits;
use pattern_catalog_core::Script;
use pattern_catalog_core::audit::ScriptOutcome;
use serde_json::json;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registry with an iterator, a singleton, and a failing entry.
fn registry() -> TestResult<Registry> {
    let mut registry = Registry::new();
    registry.register(
        PatternCategory::Iterator,
        "three-items",
        three_items(),
        contract(PatternCategory::Iterator),
    )?;
    registry.register(
        PatternCategory::Iterator,
        "broken",
        failing_factory(),
        contract(PatternCategory::Iterator),
    )?;
    registry.register(
        PatternCategory::Singleton,
        "logger",
        shared_singleton(),
        contract(PatternCategory::Singleton),
    )?;
    Ok(registry)
}

/// Script calling `next` `count` times.
fn nexts(count: usize) -> Script {
    (0..count).fold(Script::new(), |script, _| script.step("next", vec![]))
}

// ============================================================================
// SECTION: Successful Runs
// ============================================================================

#[test]
fn outputs_are_returned_in_step_order() -> TestResult {
    let registry = registry()?;
    let outputs = ExampleRunner::new(&registry).run(PatternCategory::Iterator, "three-items", &nexts(3))?;
    ensure(outputs == [json!(1), json!(2), json!(3)], format!("unexpected outputs {outputs:?}"))?;
    Ok(())
}

#[test]
fn each_run_uses_a_fresh_instance() -> TestResult {
    let registry = registry()?;
    let runner = ExampleRunner::new(&registry);
    let first = runner.run(PatternCategory::Iterator, "three-items", &nexts(1))?;
    let second = runner.run(PatternCategory::Iterator, "three-items", &nexts(1))?;
    ensure(first == second, "second run observed state from the first")?;
    Ok(())
}

#[test]
fn empty_scripts_produce_no_outputs() -> TestResult {
    let registry = registry()?;
    let outputs = ExampleRunner::new(&registry).run(PatternCategory::Iterator, "three-items", &Script::new())?;
    ensure(outputs.is_empty(), "expected no outputs")?;
    Ok(())
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn exhausted_iterator_keeps_partial_outputs() -> TestResult {
    let registry = registry()?;
    let failure = ExampleRunner::new(&registry)
        .run(PatternCategory::Iterator, "three-items", &nexts(4))
        .err()
        .ok_or("expected the fourth next to fail")?;
    ensure(failure.outputs == [json!(1), json!(2), json!(3)], "partial outputs lost")?;
    ensure(
        failure.error
            == RunError::OperationFailed {
                step: 3,
                source: PatternError::ExhaustedIterator,
            },
        format!("unexpected error {:?}", failure.error),
    )?;
    Ok(())
}

#[test]
fn unknown_operation_names_the_step() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("next", vec![]).step("rewind", vec![]).step("next", vec![]);
    let failure = ExampleRunner::new(&registry)
        .run(PatternCategory::Iterator, "three-items", &script)
        .err()
        .ok_or("expected failure")?;
    ensure(failure.outputs == [json!(1)], "partial outputs lost")?;
    ensure(
        failure.error
            == RunError::UnknownOperation {
                step: 1,
                operation: "rewind".to_string(),
            },
        format!("unexpected error {:?}", failure.error),
    )?;
    Ok(())
}

#[test]
fn panicking_operation_is_reported_with_partials() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("next", vec![]).step("explode", vec![]);
    let failure = ExampleRunner::new(&registry)
        .run(PatternCategory::Iterator, "three-items", &script)
        .err()
        .ok_or("expected failure")?;
    ensure(failure.outputs == [json!(1)], "partial outputs lost")?;
    ensure(
        matches!(failure.error, RunError::OperationPanicked { step: 1, ref message, .. } if message == "cursor exploded"),
        format!("unexpected error {:?}", failure.error),
    )?;
    Ok(())
}

#[test]
fn lookup_and_construction_failures_have_no_outputs() -> TestResult {
    let registry = registry()?;
    let runner = ExampleRunner::new(&registry);
    let missing = runner.run(PatternCategory::Proxy, "missing", &nexts(1)).err().ok_or("expected failure")?;
    ensure(missing.outputs.is_empty(), "lookup failure carried outputs")?;
    ensure(
        matches!(missing.error, RunError::Lookup(RegistryError::NotFound { .. })),
        "expected a lookup error",
    )?;
    let broken = runner.run(PatternCategory::Iterator, "broken", &nexts(1)).err().ok_or("expected failure")?;
    ensure(matches!(broken.error, RunError::Construction(_)), "expected a construction error")?;
    Ok(())
}

#[test]
fn scripts_over_the_step_limit_are_rejected_before_running() -> TestResult {
    let registry = registry()?;
    let audit = InMemoryAuditSink::new();
    let runner = ExampleRunner::new(&registry)
        .with_limits(RunnerLimits {
            max_steps: 2,
        })
        .with_audit(&audit);
    let failure = runner
        .run(PatternCategory::Singleton, "logger", &Script::new().step("record", vec![json!("x")]).step("record", vec![json!("y")]).step("record", vec![json!("z")]))
        .err()
        .ok_or("expected failure")?;
    ensure(
        failure.error
            == RunError::ScriptTooLong {
                steps: 3,
                max: 2,
            },
        "expected ScriptTooLong",
    )?;
    let records = runner.run(PatternCategory::Singleton, "logger", &Script::new().step("records", vec![]))?;
    ensure(records == [json!([])], "rejected script executed steps")?;
    Ok(())
}

// ============================================================================
// SECTION: Scripts and Audit
// ============================================================================

#[test]
fn scripts_parse_from_json_with_default_args() -> TestResult {
    let script = Script::from_json_slice(br#"{"steps":[{"operation":"next"},{"operation":"record","args":["a"]}]}"#)?;
    ensure(script.len() == 2, "expected two steps")?;
    ensure(script.steps[0].args.is_empty(), "args should default to empty")?;
    ensure(script.steps[1].args == [json!("a")], "args not parsed")?;
    let unknown = Script::from_json_slice(br#"{"steps":[],"extra":true}"#);
    ensure(unknown.is_err(), "unknown fields must be rejected")?;
    Ok(())
}

#[test]
fn every_run_records_an_audit_event() -> TestResult {
    let registry = registry()?;
    let audit = InMemoryAuditSink::new();
    let runner = ExampleRunner::new(&registry).with_audit(&audit);
    runner.run(PatternCategory::Iterator, "three-items", &nexts(2))?;
    let _ = runner.run(PatternCategory::Iterator, "three-items", &nexts(5));
    let events = audit.scripts();
    ensure(events.len() == 2, "expected two events")?;
    ensure(events[0].outcome == ScriptOutcome::Completed && events[0].completed == 2, "first event wrong")?;
    ensure(events[1].outcome == ScriptOutcome::Failed && events[1].completed == 3, "second event wrong")?;
    ensure(events[1].error.is_some(), "failed event has no error")?;
    Ok(())
}
