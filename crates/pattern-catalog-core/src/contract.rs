// crates/pattern-catalog-core/src/contract.rs
// ============================================================================
// Module: Contract Model
// Description: Ordered behavioral checks a pattern category must satisfy.
// Purpose: Describe verification as immutable data plus pure check functions.
// Dependencies: crate::{category, error, factory, instance, runner}, thiserror
// ============================================================================

//! ## Overview
//! A [`Contract`] is an ordered list of [`Check`]s for one category. Each
//! check receives a [`CheckContext`] that lazily constructs the primary
//! instance from the entry's factory and can construct further fresh
//! instances when the check compares several (a singleton identity check,
//! for example). Checks report through [`CheckOutcome`]; they never mutate
//! state outside the instances they construct.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::category::PatternCategory;
use crate::error::FactoryError;
use crate::error::PatternError;
use crate::factory::Factory;
use crate::instance::PatternInstance;
use crate::runner::Script;
use crate::runner::execute_steps;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Failure detail produced by a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct CheckFailure {
    /// Human-readable failure detail.
    pub detail: String,
}

impl CheckFailure {
    /// Creates a failure with the provided detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Failure for an instance whose variant does not match the contract.
    #[must_use]
    pub fn wrong_variant(expected: PatternCategory, actual: PatternCategory) -> Self {
        Self::new(format!("expected a {expected} instance, factory produced {actual}"))
    }
}

impl From<PatternError> for CheckFailure {
    fn from(error: PatternError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<FactoryError> for CheckFailure {
    fn from(error: FactoryError) -> Self {
        Self::new(error.to_string())
    }
}

/// Result of running one check.
pub type CheckOutcome = Result<(), CheckFailure>;

/// Fails with the lazily formatted detail unless `condition` holds.
///
/// # Errors
///
/// Returns [`CheckFailure`] when `condition` is false.
pub fn require(condition: bool, detail: impl FnOnce() -> String) -> CheckOutcome {
    if condition { Ok(()) } else { Err(CheckFailure::new(detail())) }
}

// ============================================================================
// SECTION: Check Context
// ============================================================================

/// Instances available to one check run.
pub struct CheckContext<'a> {
    /// Category the contract verifies.
    category: PatternCategory,
    /// Factory of the entry under verification.
    factory: &'a Factory,
    /// Lazily constructed primary instance.
    primary: Option<PatternInstance>,
}

impl<'a> CheckContext<'a> {
    /// Creates a context over `factory` for a contract of `category`.
    #[must_use]
    pub const fn new(category: PatternCategory, factory: &'a Factory) -> Self {
        Self {
            category,
            factory,
            primary: None,
        }
    }

    /// Category the contract verifies.
    #[must_use]
    pub const fn category(&self) -> PatternCategory {
        self.category
    }

    /// Returns the primary instance, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailure`] when construction fails.
    pub fn instance(&mut self) -> Result<&mut PatternInstance, CheckFailure> {
        if self.primary.is_none() {
            self.primary = Some(self.factory.construct()?);
        }
        self.primary.as_mut().ok_or_else(|| CheckFailure::new("primary instance unavailable"))
    }

    /// Constructs an additional, independent instance.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailure`] when construction fails.
    pub fn fresh(&self) -> Result<PatternInstance, CheckFailure> {
        Ok(self.factory.construct()?)
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Check body.
type CheckFn = dyn Fn(&mut CheckContext<'_>) -> CheckOutcome + Send + Sync;

/// One executable assertion within a contract.
#[derive(Clone)]
pub struct Check {
    /// Human-readable description, used as the report row label.
    description: String,
    /// Check body.
    run: Arc<CheckFn>,
}

impl Check {
    /// Creates a check.
    pub fn new<F>(description: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut CheckContext<'_>) -> CheckOutcome + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            run: Arc::new(run),
        }
    }

    /// Creates a check that runs `script` on the primary instance and
    /// compares the outputs with `expected`.
    pub fn scripted(description: impl Into<String>, script: Script, expected: Vec<Value>) -> Self {
        Self::new(description, move |context| {
            let instance = context.instance()?;
            let outputs = execute_steps(instance.scriptable_mut(), &script)
                .map_err(|failure| CheckFailure::new(failure.to_string()))?;
            require(outputs == expected, || {
                format!(
                    "script outputs {} differ from expected {}",
                    Value::Array(outputs.clone()),
                    Value::Array(expected.clone())
                )
            })
        })
    }

    /// Description used as the report row label.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailure`] when the check does not hold.
    pub fn run(&self, context: &mut CheckContext<'_>) -> CheckOutcome {
        (self.run)(context)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("description", &self.description).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Ordered checks defining correct behavior for one category.
///
/// # Invariants
/// - Checks run in declaration order.
/// - Contracts are immutable once built; share them through [`Arc`].
#[derive(Debug, Clone)]
pub struct Contract {
    /// Category the contract verifies.
    category: PatternCategory,
    /// Checks in declaration order.
    checks: Vec<Check>,
}

impl Contract {
    /// Creates an empty contract for `category`.
    #[must_use]
    pub const fn new(category: PatternCategory) -> Self {
        Self {
            category,
            checks: Vec::new(),
        }
    }

    /// Appends a check.
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends a check built from a description and body.
    #[must_use]
    pub fn check<F>(self, description: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut CheckContext<'_>) -> CheckOutcome + Send + Sync + 'static,
    {
        self.with_check(Check::new(description, run))
    }

    /// Category the contract verifies.
    #[must_use]
    pub const fn category(&self) -> PatternCategory {
        self.category
    }

    /// Checks in declaration order.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Number of checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true when the contract has no checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
