// crates/pattern-catalog-core/src/contracts/mod.rs
// ============================================================================
// Module: Standard Contracts
// Description: Behavioral contracts for every pattern category.
// Purpose: Define what "correct" means for each category as executable checks.
// Dependencies: crate::{category, contract, instance}
// ============================================================================

//! ## Overview
//! [`standard`] builds the contract for one category. [`ContractBook`] builds
//! all of them once and hands out shared handles, so every entry of a
//! category verifies against the same immutable contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::category::PatternCategory;
use crate::contract::CheckFailure;
use crate::contract::Contract;
use crate::instance::PatternInstance;

mod behavioral;
mod creational;
mod structural;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reaches the typed capability of `instance` or fails with a variant mismatch.
fn capability<'i, T: ?Sized>(
    instance: &'i mut PatternInstance,
    expected: PatternCategory,
    access: impl FnOnce(&'i mut PatternInstance) -> Option<&'i mut T>,
) -> Result<&'i mut T, CheckFailure> {
    let actual = instance.category();
    access(instance).ok_or_else(|| CheckFailure::wrong_variant(expected, actual))
}

/// Renders a list of names for failure details.
fn names(values: &[String]) -> String {
    format!("[{}]", values.join(", "))
}

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Builds the standard contract for `category`.
#[must_use]
pub fn standard(category: PatternCategory) -> Contract {
    match category {
        PatternCategory::Singleton => creational::singleton(),
        PatternCategory::Factory => creational::factory(),
        PatternCategory::AbstractFactory => creational::abstract_factory(),
        PatternCategory::Builder => creational::builder(),
        PatternCategory::ObjectPool => creational::object_pool(),
        PatternCategory::Prototype => creational::prototype(),
        PatternCategory::Observer => behavioral::observer(),
        PatternCategory::Command => behavioral::command(),
        PatternCategory::State => behavioral::state(),
        PatternCategory::Strategy => behavioral::strategy(),
        PatternCategory::Visitor => behavioral::visitor(),
        PatternCategory::Mediator => behavioral::mediator(),
        PatternCategory::Iterator => behavioral::iterator(),
        PatternCategory::Decorator => structural::decorator(),
        PatternCategory::Composite => structural::composite(),
        PatternCategory::Proxy => structural::proxy(),
        PatternCategory::Adapter => structural::adapter(),
        PatternCategory::Bridge => structural::bridge(),
        PatternCategory::Facade => structural::facade(),
        PatternCategory::Module => structural::module(),
    }
}

/// Shared standard contracts, one per category.
#[derive(Debug, Clone)]
pub struct ContractBook {
    /// Contracts keyed by category.
    contracts: BTreeMap<PatternCategory, Arc<Contract>>,
}

impl ContractBook {
    /// Builds the standard contract of every category.
    #[must_use]
    pub fn standard() -> Self {
        let contracts = PatternCategory::ALL
            .iter()
            .map(|category| (*category, Arc::new(standard(*category))))
            .collect();
        Self {
            contracts,
        }
    }

    /// Shared contract for `category`.
    #[must_use]
    pub fn get(&self, category: PatternCategory) -> Arc<Contract> {
        self.contracts
            .get(&category)
            .cloned()
            .unwrap_or_else(|| Arc::new(standard(category)))
    }
}

impl Default for ContractBook {
    fn default() -> Self {
        Self::standard()
    }
}
