//! Property-based tests for verification and scripted runs.
//!
//! ## Purpose
//! These tests vary collection sizes, pool limits, and script lengths to show
//! that contracts accept every correct configuration and the runner keeps
//! partial outputs regardless of where a script fails.
// crates/pattern-catalog-core/tests/proptest_contracts.rs
// ============================================================================
// Module: Contract Property-Based Tests
// Description: Randomized coverage for iterator, pool, and runner behavior.
// Purpose: Ensure verification outcomes do not depend on fixture sizes.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

#[path = "support/fixtures.rs"]
mod fixtures;

use fixtures::ListCursor;
use fixtures::NumberedPool;
use fixtures::contract;
use pattern_catalog_core::ExampleRunner;
use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RunError;
use pattern_catalog_core::Script;
use pattern_catalog_core::Verifier;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

/// Registry with one iterator over `items`.
fn iterator_registry(items: &[i64]) -> Registry {
    let values: Vec<Value> = items.iter().map(|item| json!(item)).collect();
    let mut registry = Registry::new();
    registry
        .register(
            PatternCategory::Iterator,
            "generated",
            Factory::new(move || Ok(PatternInstance::iterator(ListCursor::new(values.clone())))),
            contract(PatternCategory::Iterator),
        )
        .unwrap();
    registry
}

proptest! {
    #[test]
    fn iterators_of_any_length_pass(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let registry = iterator_registry(&items);
        let report = Verifier::new(&registry).verify(PatternCategory::Iterator, "generated").unwrap();
        prop_assert!(report.passed(), "{:?}", report.results);
    }

    #[test]
    fn bounded_pools_of_any_size_pass(max in 1usize..64) {
        let mut registry = Registry::new();
        registry
            .register(
                PatternCategory::ObjectPool,
                "generated",
                Factory::new(move || Ok(PatternInstance::object_pool(NumberedPool::new(max)))),
                contract(PatternCategory::ObjectPool),
            )
            .unwrap();
        let report = Verifier::new(&registry).verify(PatternCategory::ObjectPool, "generated").unwrap();
        prop_assert!(report.passed(), "{:?}", report.results);
    }

    #[test]
    fn runner_keeps_every_output_before_exhaustion(
        items in prop::collection::vec(any::<i64>(), 0..16),
        extra in 1usize..4,
    ) {
        let registry = iterator_registry(&items);
        let script = (0..items.len() + extra).fold(Script::new(), |script, _| script.step("next", vec![]));
        let failure = ExampleRunner::new(&registry)
            .run(PatternCategory::Iterator, "generated", &script)
            .unwrap_err();
        let expected: Vec<Value> = items.iter().map(|item| json!(item)).collect();
        prop_assert_eq!(failure.outputs, expected);
        let failed_step = matches!(failure.error, RunError::OperationFailed { step, .. } if step == items.len());
        prop_assert!(failed_step);
    }
}
