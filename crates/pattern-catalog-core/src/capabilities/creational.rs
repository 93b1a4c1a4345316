// crates/pattern-catalog-core/src/capabilities/creational.rs
// ============================================================================
// Module: Creational Capabilities
// Description: Capability traits for object-creation pattern families.
// Purpose: Name the operations contracts rely on for creational entries.
// Dependencies: crate::{error, instance}, serde, serde_json
// ============================================================================

//! ## Overview
//! Singleton, Factory, Abstract Factory, Builder, Object Pool, and Prototype
//! capabilities. Every trait extends [`Scriptable`] so the example runner can
//! drive the same instance by operation name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::PatternError;
use crate::instance::Scriptable;

// ============================================================================
// SECTION: Shared Types
// ============================================================================

/// Opaque identity of a shared instance.
///
/// Two handles with equal keys refer to the same underlying object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceKey(pub usize);

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Product returned by factories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product kind or role (`dog`, `chair`, ...).
    pub kind: String,
    /// Family the product belongs to, when created by an abstract factory.
    pub family: Option<String>,
    /// Observable product behavior.
    pub detail: Value,
}

/// Handle to an object checked out of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PooledObject {
    /// Identifier assigned when the object was constructed.
    pub id: u64,
}

/// What the pool did with a released object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// Object was returned to the idle pool.
    Retained,
    /// Pool was full; object was dropped.
    Discarded,
    /// Object was not checked out from this pool; nothing changed.
    Rejected,
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Singleton capability: every handle shares one instance.
pub trait SingletonPattern: Scriptable {
    /// Identity of the underlying shared instance.
    fn instance_key(&self) -> InstanceKey;

    /// Appends an entry to the shared state.
    fn record(&mut self, entry: &str);

    /// Returns the shared state entries in insertion order.
    fn records(&self) -> Vec<String>;

    /// Removes the most recent occurrence of `entry`. Returns false when it
    /// was not present.
    fn retract(&mut self, entry: &str) -> bool;
}

/// Factory capability: creates products by kind.
pub trait FactoryPattern: Scriptable {
    /// Kinds this factory can create.
    fn kinds(&self) -> Vec<String>;

    /// Creates a product of `kind` labelled `label`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown kinds.
    fn create(&self, kind: &str, label: &str) -> Result<Product, PatternError>;
}

/// Abstract factory capability: creates a family of related products.
pub trait AbstractFactoryPattern: Scriptable {
    /// Families this factory can create.
    fn families(&self) -> Vec<String>;

    /// Creates one product for every role of `family`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown families.
    fn create_family(&self, family: &str) -> Result<Vec<Product>, PatternError>;
}

/// Builder capability: assembles a product part by part.
pub trait BuilderPattern: Scriptable {
    /// Parts the product is made of.
    fn parts(&self) -> Vec<String>;

    /// Sets one part of the product under construction.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown parts.
    fn set_part(&mut self, part: &str, value: Value) -> Result<(), PatternError>;

    /// Returns the assembled product and resets the builder.
    fn build(&mut self) -> Map<String, Value>;
}

/// Object pool capability with an explicit maximum idle size.
pub trait ObjectPoolPattern: Scriptable {
    /// Maximum number of idle objects retained.
    fn max_size(&self) -> usize;

    /// Checks out an idle object, constructing one when none is idle.
    fn acquire(&mut self) -> PooledObject;

    /// Returns an object to the pool. Objects that are not currently
    /// checked out are [`ReleaseOutcome::Rejected`].
    fn release(&mut self, object: PooledObject) -> ReleaseOutcome;

    /// Number of idle objects.
    fn available(&self) -> usize;

    /// Number of objects constructed so far.
    fn created(&self) -> u64;
}

/// Prototype capability: creates new objects by cloning.
pub trait PrototypePattern: Scriptable {
    /// Structural view of the object.
    fn snapshot(&self) -> Value;

    /// Clones the object into an independent instance.
    fn clone_prototype(&self) -> Box<dyn PrototypePattern>;

    /// Overwrites one field of this object.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown fields.
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), PatternError>;
}
