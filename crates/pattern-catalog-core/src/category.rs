// crates/pattern-catalog-core/src/category.rs
// ============================================================================
// Module: Pattern Categories
// Description: Closed set of design-pattern families known to the catalog.
// Purpose: Provide stable labels for registry keys, CLI parsing, and serde.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`PatternCategory`] is the fixed tag every registry entry, contract, and
//! instance carries. Labels are stable `snake_case` strings and are the only
//! accepted textual form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Category
// ============================================================================

/// Design-pattern family tag.
///
/// # Invariants
/// - The variant set is closed; labels returned by [`PatternCategory::label`]
///   are stable and unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// One shared instance per factory.
    Singleton,
    /// Subject broadcasting updates to subscribers.
    Observer,
    /// Encapsulated, undoable requests.
    Command,
    /// Kind-keyed product creation.
    Factory,
    /// Stackable wrappers around a base component.
    Decorator,
    /// Part/whole trees with uniform aggregation.
    Composite,
    /// Deferred or guarded access to a real subject.
    Proxy,
    /// Behavior selected by the current internal state.
    State,
    /// Interchangeable algorithms behind one context.
    Strategy,
    /// Operations applied over an element structure.
    Visitor,
    /// Colleagues communicating through a hub.
    Mediator,
    /// Sequential access to a collection.
    Iterator,
    /// Translation of incompatible interfaces to a target shape.
    Adapter,
    /// Abstractions decoupled from their implementations.
    Bridge,
    /// Simplified entry point over several subsystems.
    Facade,
    /// Step-wise assembly of a product.
    Builder,
    /// Families of related products.
    AbstractFactory,
    /// Reusable objects with a bounded idle pool.
    ObjectPool,
    /// Creation by cloning an existing object.
    Prototype,
    /// Encapsulated state behind public members.
    Module,
}

impl PatternCategory {
    /// Every category in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Singleton,
        Self::Observer,
        Self::Command,
        Self::Factory,
        Self::Decorator,
        Self::Composite,
        Self::Proxy,
        Self::State,
        Self::Strategy,
        Self::Visitor,
        Self::Mediator,
        Self::Iterator,
        Self::Adapter,
        Self::Bridge,
        Self::Facade,
        Self::Builder,
        Self::AbstractFactory,
        Self::ObjectPool,
        Self::Prototype,
        Self::Module,
    ];

    /// Returns the stable label for the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Observer => "observer",
            Self::Command => "command",
            Self::Factory => "factory",
            Self::Decorator => "decorator",
            Self::Composite => "composite",
            Self::Proxy => "proxy",
            Self::State => "state",
            Self::Strategy => "strategy",
            Self::Visitor => "visitor",
            Self::Mediator => "mediator",
            Self::Iterator => "iterator",
            Self::Adapter => "adapter",
            Self::Bridge => "bridge",
            Self::Facade => "facade",
            Self::Builder => "builder",
            Self::AbstractFactory => "abstract_factory",
            Self::ObjectPool => "object_pool",
            Self::Prototype => "prototype",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Error returned when a label does not name a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pattern category: {label}")]
pub struct CategoryParseError {
    /// Label that failed to parse.
    pub label: String,
}

impl FromStr for PatternCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|category| category.label() == normalized).ok_or_else(|| {
            CategoryParseError {
                label: value.to_string(),
            }
        })
    }
}
