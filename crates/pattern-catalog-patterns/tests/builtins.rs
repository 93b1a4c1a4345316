// crates/pattern-catalog-patterns/tests/builtins.rs
// ============================================================================
// Module: Built-in Verification Tests
// Description: Runs every contract against every built-in entry.
// Purpose: Ensure the shipped examples satisfy their category contracts.
// Dependencies: pattern-catalog-core, pattern-catalog-patterns
// ============================================================================
//! ## Overview
//! Verifies the whole built-in registry and a few targeted registrations.

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

mod support;

use std::sync::Arc;

use pattern_catalog_core::CONSTRUCTION_CHECK;
use pattern_catalog_core::ContractBook;
use pattern_catalog_core::InMemoryAuditSink;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RegistryError;
use pattern_catalog_core::Verifier;
use pattern_catalog_patterns::BuiltinOptions;
use pattern_catalog_patterns::builtin_registry;
use pattern_catalog_patterns::creational::object_pool;
use pattern_catalog_patterns::register_builtins;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_builtin_entry_passes_its_contract() -> TestResult {
    let registry = builtin_registry(&BuiltinOptions::default())?;
    let reports = Verifier::new(&registry).verify_registry();
    ensure(reports.len() == registry.len(), "one report per entry")?;
    for report in &reports {
        let failures: Vec<String> = report
            .results
            .iter()
            .filter(|result| !result.passed)
            .map(|result| format!("{}: {}", result.description, result.detail.clone().unwrap_or_default()))
            .collect();
        ensure(
            report.passed(),
            format!("{} / {} failed: {}", report.category, report.entry, failures.join("; ")),
        )?;
        ensure(
            report.results.first().is_some_and(|result| result.description == CONSTRUCTION_CHECK),
            "construction row leads every report",
        )?;
    }
    Ok(())
}

#[test]
fn every_category_ships_at_least_one_example() -> TestResult {
    let registry = builtin_registry(&BuiltinOptions::default())?;
    for category in PatternCategory::ALL {
        ensure(registry.list(category).next().is_some(), format!("{category} has no built-in entry"))?;
    }
    Ok(())
}

#[test]
fn registering_builtins_twice_reports_the_duplicate() -> TestResult {
    let book = ContractBook::standard();
    let mut registry = Registry::new();
    register_builtins(&mut registry, &book, &BuiltinOptions::default())?;
    let outcome = register_builtins(&mut registry, &book, &BuiltinOptions::default());
    ensure(matches!(outcome, Err(RegistryError::DuplicateName { .. })), "second registration must fail")
}

#[test]
fn pools_of_size_one_still_pass() -> TestResult {
    let registry = builtin_registry(&BuiltinOptions {
        pool_max_size: 1,
    })?;
    for report in Verifier::new(&registry).verify_all(PatternCategory::ObjectPool) {
        ensure(report.passed(), format!("{} failed with max size 1", report.entry))?;
    }
    Ok(())
}

#[test]
fn zero_sized_pool_fails_construction_but_keeps_every_row() -> TestResult {
    let book = ContractBook::standard();
    let contract = book.get(PatternCategory::ObjectPool);
    let mut registry = Registry::new();
    registry.register(
        PatternCategory::ObjectPool,
        "empty",
        object_pool::database_connections(0),
        Arc::clone(&contract),
    )?;
    let report = Verifier::new(&registry).verify(PatternCategory::ObjectPool, "empty")?;
    ensure(!report.passed(), "zero-sized pool must not pass")?;
    ensure(report.results.len() == contract.len() + 1, "construction row plus one row per check")?;
    ensure(report.failed_count() == report.results.len(), "every row fails after construction fails")
}

#[test]
fn verifying_the_registry_records_one_audit_event_per_entry() -> TestResult {
    let registry = builtin_registry(&BuiltinOptions::default())?;
    let audit = InMemoryAuditSink::new();
    let reports = Verifier::new(&registry).with_audit(&audit).verify_registry();
    ensure(audit.verifications().len() == reports.len(), "one audit event per report")
}
