// crates/pattern-catalog-patterns/tests/proptest_pools.rs
// ============================================================================
// Module: Pool Bound Property Tests
// Description: Property-based checks over configured pool sizes.
// Purpose: Ensure built-in pools honor any positive max size.
// Dependencies: pattern-catalog-core, pattern-catalog-patterns, proptest
// ============================================================================
//! ## Overview
//! Builds the built-in registry with arbitrary pool bounds and verifies the
//! object pool entries.

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

use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Verifier;
use pattern_catalog_patterns::BuiltinOptions;
use pattern_catalog_patterns::builtin_registry;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pools_pass_for_any_positive_bound(max_size in 1usize..64) {
        let registry = builtin_registry(&BuiltinOptions { pool_max_size: max_size })
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        for report in Verifier::new(&registry).verify_all(PatternCategory::ObjectPool) {
            prop_assert!(report.passed(), "{} failed with max size {}", report.entry, max_size);
        }
    }

    #[test]
    fn pool_max_size_is_reported_as_configured(max_size in 1usize..64) {
        let registry = builtin_registry(&BuiltinOptions { pool_max_size: max_size })
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let entry = registry
            .get(PatternCategory::ObjectPool, "database-connections")
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let mut instance = entry.factory().construct().map_err(|error| TestCaseError::fail(error.to_string()))?;
        let pool = instance.as_object_pool_mut().ok_or_else(|| TestCaseError::fail("wrong variant"))?;
        prop_assert_eq!(pool.max_size(), max_size);
    }
}
