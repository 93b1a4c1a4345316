// crates/pattern-catalog-patterns/src/lib.rs
// ============================================================================
// Module: Built-in Pattern Catalog
// Description: Example implementations for every pattern category.
// Purpose: Populate a registry with verifiable, scriptable entries.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Two worked examples per pattern category (loggers, stock tickers, coffee
//! decorators, traffic lights, ...), each implementing the category's
//! capability trait and a scripted operation surface. [`builtin_registry`]
//! registers all of them against the standard contracts.
//!
//! Security posture: entries simulate every external resource in memory; no
//! entry touches the filesystem, network, or process environment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod behavioral;
pub mod creational;
pub mod structural;

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::ContractBook;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RegistryError;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Default idle bound for built-in object pools.
pub const DEFAULT_POOL_MAX_SIZE: usize = 4;

/// Tunables applied to built-in entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Idle bound passed to every built-in object pool.
    pub pool_max_size: usize,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Builds a registry holding every built-in entry.
///
/// Entries are registered category by category against one shared
/// [`ContractBook`], so all entries of a category share a contract.
///
/// # Errors
///
/// Returns [`RegistryError`] if two built-ins collide on a name.
pub fn builtin_registry(options: &BuiltinOptions) -> Result<Registry, RegistryError> {
    let book = ContractBook::standard();
    let mut registry = Registry::new();
    register_builtins(&mut registry, &book, options)?;
    Ok(registry)
}

/// Registers every built-in entry into an existing registry.
///
/// # Errors
///
/// Returns [`RegistryError`] when an entry name is already taken.
pub fn register_builtins(
    registry: &mut Registry,
    book: &ContractBook,
    options: &BuiltinOptions,
) -> Result<(), RegistryError> {
    creational::register(registry, book, options)?;
    behavioral::register(registry, book)?;
    structural::register(registry, book)?;
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Owned copies of static names.
pub(crate) fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
