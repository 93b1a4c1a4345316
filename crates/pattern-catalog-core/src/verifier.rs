// crates/pattern-catalog-core/src/verifier.rs
// ============================================================================
// Module: Contract Verifier
// Description: Runs an entry's contract and reports every check outcome.
// Purpose: Total verification that never aborts on a failing implementation.
// Dependencies: crate::{audit, category, contract, registry, runner}, serde
// ============================================================================

//! ## Overview
//! Verification is total: a factory that fails, a check that fails, and a
//! check that panics all become failed report rows. Only the registry lookup
//! in [`Verifier::verify`] can fail. Every report starts with a
//! [`CONSTRUCTION_CHECK`] row; when construction fails, each contract check is
//! still listed and marked failed with the construction detail.
//!
//! Each check runs against its own [`CheckContext`], so checks never observe
//! state left behind by an earlier check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use serde::Deserialize;
use serde::Serialize;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::VerificationAuditEvent;
use crate::category::PatternCategory;
use crate::contract::CheckContext;
use crate::contract::CheckFailure;
use crate::error::RegistryError;
use crate::registry::PatternEntry;
use crate::registry::Registry;
use crate::runner::construct_guarded;
use crate::runner::panic_message;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Description of the leading row that reports instance construction.
pub const CONSTRUCTION_CHECK: &str = "construction";

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check description.
    pub description: String,
    /// True when the check held.
    pub passed: bool,
    /// Failure detail; absent for passing checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    /// Passing row.
    #[must_use]
    pub fn pass(description: &str) -> Self {
        Self {
            description: description.to_string(),
            passed: true,
            detail: None,
        }
    }

    /// Failing row.
    #[must_use]
    pub fn fail(description: &str, detail: impl Into<String>) -> Self {
        Self {
            description: description.to_string(),
            passed: false,
            detail: Some(detail.into()),
        }
    }
}

/// Verification outcome for one entry.
///
/// # Invariants
/// - `results[0]` is the [`CONSTRUCTION_CHECK`] row.
/// - The remaining rows follow contract declaration order.
/// - Overall pass is derived from the rows, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Entry category.
    pub category: PatternCategory,
    /// Entry name.
    pub entry: String,
    /// Rows in execution order.
    pub results: Vec<CheckResult>,
}

impl VerificationReport {
    /// Returns true when every row passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.iter().all(|result| result.passed)
    }

    /// Number of failed rows.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|result| !result.passed).count()
    }

    /// Row for the check with `description`, if present.
    #[must_use]
    pub fn result(&self, description: &str) -> Option<&CheckResult> {
        self.results.iter().find(|result| result.description == description)
    }
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Verifies one entry against its contract.
#[must_use]
pub fn verify_entry(entry: &PatternEntry) -> VerificationReport {
    let category = entry.category();
    let contract = entry.contract();
    let mut results = Vec::with_capacity(contract.len() + 1);

    let construction = match construct_guarded(entry.factory()) {
        Ok(instance) if instance.category() == category => Ok(()),
        Ok(instance) => Err(CheckFailure::wrong_variant(category, instance.category()).detail),
        Err(error) => Err(error.to_string()),
    };

    match construction {
        Ok(()) => {
            results.push(CheckResult::pass(CONSTRUCTION_CHECK));
            for check in contract.checks() {
                let mut context = CheckContext::new(category, entry.factory());
                let outcome = catch_unwind(AssertUnwindSafe(|| check.run(&mut context)));
                results.push(match outcome {
                    Ok(Ok(())) => CheckResult::pass(check.description()),
                    Ok(Err(failure)) => CheckResult::fail(check.description(), failure.detail),
                    Err(payload) => CheckResult::fail(
                        check.description(),
                        format!("check panicked: {}", panic_message(payload.as_ref())),
                    ),
                });
            }
        }
        Err(detail) => {
            results.push(CheckResult::fail(CONSTRUCTION_CHECK, detail.clone()));
            for check in contract.checks() {
                results.push(CheckResult::fail(
                    check.description(),
                    format!("not run: {detail}"),
                ));
            }
        }
    }

    VerificationReport {
        category,
        entry: entry.name().to_string(),
        results,
    }
}

/// Verifies registry entries and records one audit event per report.
pub struct Verifier<'a> {
    /// Registry the verifier reads from.
    registry: &'a Registry,
    /// Audit destination.
    audit: &'a dyn AuditSink,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier with no audit output.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            audit: &NoopAuditSink,
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: &'a dyn AuditSink) -> Self {
        self.audit = audit;
        self
    }

    /// Verifies the entry registered under `(category, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when the entry does not exist.
    pub fn verify(
        &self,
        category: PatternCategory,
        name: &str,
    ) -> Result<VerificationReport, RegistryError> {
        let entry = self.registry.get(category, name)?;
        Ok(self.verify_recorded(&entry))
    }

    /// Verifies every entry of `category` in registration order.
    ///
    /// A failing entry never stops the remaining entries.
    #[must_use]
    pub fn verify_all(&self, category: PatternCategory) -> Vec<VerificationReport> {
        self.registry.entries(category).map(|entry| self.verify_recorded(entry)).collect()
    }

    /// Verifies every entry of every category.
    #[must_use]
    pub fn verify_registry(&self) -> Vec<VerificationReport> {
        PatternCategory::ALL.iter().flat_map(|category| self.verify_all(*category)).collect()
    }

    /// Verifies one entry and records the audit event.
    fn verify_recorded(&self, entry: &PatternEntry) -> VerificationReport {
        let report = verify_entry(entry);
        self.audit.record_verification(&VerificationAuditEvent::new(
            report.category,
            &report.entry,
            report.results.len(),
            report.failed_count(),
        ));
        report
    }
}
