// crates/pattern-catalog-core/src/registry.rs
// ============================================================================
// Module: Pattern Registry
// Description: Named pattern implementations keyed by category and name.
// Purpose: Store factories and contracts with strict name uniqueness.
// Dependencies: crate::{category, contract, error, factory}
// ============================================================================

//! ## Overview
//! The registry owns every [`PatternEntry`]. Names are unique within a
//! category and listed in registration order. Mutations are synchronous and
//! visible to the next call. [`SharedRegistry`] adds the single-lock
//! discipline for hosts that share a registry across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;

use crate::category::PatternCategory;
use crate::contract::Contract;
use crate::error::RegistryError;
use crate::factory::Factory;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum entry name length in bytes.
pub const MAX_ENTRY_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Entries
// ============================================================================

/// Registered pattern implementation.
///
/// # Invariants
/// - `contract.category() == category`.
/// - Never mutated after registration.
#[derive(Clone)]
pub struct PatternEntry {
    /// Entry category.
    category: PatternCategory,
    /// Entry name, unique within the category.
    name: String,
    /// Instance constructor.
    factory: Factory,
    /// Contract shared by entries of the category.
    contract: Arc<Contract>,
}

impl PatternEntry {
    /// Entry category.
    #[must_use]
    pub const fn category(&self) -> PatternCategory {
        self.category
    }

    /// Entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instance constructor.
    #[must_use]
    pub const fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Contract used to verify the entry.
    #[must_use]
    pub const fn contract(&self) -> &Arc<Contract> {
        &self.contract
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// In-memory registry of pattern entries.
#[derive(Clone, Default)]
pub struct Registry {
    /// Entries per category in registration order.
    entries: BTreeMap<PatternCategory, Vec<Arc<PatternEntry>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when `(category, name)` exists,
    /// [`RegistryError::ContractMismatch`] when the contract verifies another
    /// category, and [`RegistryError::InvalidName`] for empty or oversized names.
    pub fn register(
        &mut self,
        category: PatternCategory,
        name: impl Into<String>,
        factory: Factory,
        contract: Arc<Contract>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        validate_name(&name)?;
        if contract.category() != category {
            return Err(RegistryError::ContractMismatch {
                category,
                contract: contract.category(),
                name,
            });
        }
        let entries = self.entries.entry(category).or_default();
        if entries.iter().any(|entry| entry.name == name) {
            return Err(RegistryError::DuplicateName {
                category,
                name,
            });
        }
        entries.push(Arc::new(PatternEntry {
            category,
            name,
            factory,
            contract,
        }));
        Ok(())
    }

    /// Removes an entry. Returns true when an entry was removed; absent
    /// entries are not an error.
    pub fn unregister(&mut self, category: PatternCategory, name: &str) -> bool {
        let Some(entries) = self.entries.get_mut(&category) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.name != name);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.entries.remove(&category);
        }
        removed
    }

    /// Returns the entry registered under `(category, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no such entry exists.
    pub fn get(&self, category: PatternCategory, name: &str) -> Result<Arc<PatternEntry>, RegistryError> {
        self.entries
            .get(&category)
            .and_then(|entries| entries.iter().find(|entry| entry.name == name))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                category,
                name: name.to_string(),
            })
    }

    /// Lazily yields entry names of `category` in registration order.
    pub fn list(&self, category: PatternCategory) -> impl Iterator<Item = &str> + '_ {
        self.entries(category).map(|entry| entry.name.as_str())
    }

    /// Lazily yields entries of `category` in registration order.
    pub fn entries(&self, category: PatternCategory) -> impl Iterator<Item = &Arc<PatternEntry>> + '_ {
        self.entries.get(&category).into_iter().flatten()
    }

    /// Categories with at least one entry, in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = PatternCategory> + '_ {
        self.entries.iter().filter(|(_, entries)| !entries.is_empty()).map(|(category, _)| *category)
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true when no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validates an entry name against length limits.
fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidName("name must be non-empty".to_string()));
    }
    if name.len() > MAX_ENTRY_NAME_LENGTH {
        return Err(RegistryError::InvalidName(format!(
            "name exceeds {MAX_ENTRY_NAME_LENGTH} bytes"
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Shared Registry
// ============================================================================

/// Registry shared across threads.
///
/// # Invariants
/// - `register` and `unregister` hold the write lock for the whole
///   read-modify-write sequence.
/// - Reads may run concurrently with each other but not with a mutation.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    /// Guarded registry.
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Registers a new entry under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register(
        &self,
        category: PatternCategory,
        name: impl Into<String>,
        factory: Factory,
        contract: Arc<Contract>,
    ) -> Result<(), RegistryError> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).register(
            category, name, factory, contract,
        )
    }

    /// Removes an entry under the write lock.
    pub fn unregister(&self, category: PatternCategory, name: &str) -> bool {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).unregister(category, name)
    }

    /// Returns an entry under the read lock.
    ///
    /// # Errors
    ///
    /// See [`Registry::get`].
    pub fn get(&self, category: PatternCategory, name: &str) -> Result<Arc<PatternEntry>, RegistryError> {
        self.read().get(category, name)
    }

    /// Returns the current entry names of `category`.
    #[must_use]
    pub fn list(&self, category: PatternCategory) -> Vec<String> {
        self.read().list(category).map(str::to_string).collect()
    }

    /// Acquires the read lock for verification or running scripts.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
