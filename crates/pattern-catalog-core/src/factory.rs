// crates/pattern-catalog-core/src/factory.rs
// ============================================================================
// Module: Pattern Factories
// Description: Shared constructors producing tagged pattern instances.
// Purpose: Support no-argument and configuration-argument construction.
// Dependencies: crate::{error, instance}, serde_json
// ============================================================================

//! ## Overview
//! A [`Factory`] is cheap to clone and shares its build closure. Any state a
//! pattern needs across constructions (a singleton's one instance, for
//! example) lives in that closure, scoped to the registry entry that owns it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::error::FactoryError;
use crate::instance::PatternInstance;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result of one construction.
pub type FactoryResult = Result<PatternInstance, FactoryError>;

/// No-argument build closure.
type PlainBuild = dyn Fn() -> FactoryResult + Send + Sync;

/// Configuration-argument build closure.
type ConfiguredBuild = dyn Fn(&Value) -> FactoryResult + Send + Sync;

/// Build strategy held by a factory.
#[derive(Clone)]
enum FactoryKind {
    /// Constructed without arguments.
    Plain(Arc<PlainBuild>),
    /// Constructed from a fixed configuration value.
    Configured {
        /// Configuration passed on every construction.
        config: Arc<Value>,
        /// Build closure.
        build: Arc<ConfiguredBuild>,
    },
}

/// Constructor for pattern instances.
#[derive(Clone)]
pub struct Factory {
    /// Build strategy.
    kind: FactoryKind,
}

impl Factory {
    /// Creates a no-argument factory.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> FactoryResult + Send + Sync + 'static,
    {
        Self {
            kind: FactoryKind::Plain(Arc::new(build)),
        }
    }

    /// Creates a factory that passes `config` to `build` on every construction.
    pub fn with_config<F>(config: Value, build: F) -> Self
    where
        F: Fn(&Value) -> FactoryResult + Send + Sync + 'static,
    {
        Self {
            kind: FactoryKind::Configured {
                config: Arc::new(config),
                build: Arc::new(build),
            },
        }
    }

    /// Constructs a new instance.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the build closure fails.
    pub fn construct(&self) -> FactoryResult {
        match &self.kind {
            FactoryKind::Plain(build) => build(),
            FactoryKind::Configured {
                config,
                build,
            } => build(config),
        }
    }

    /// Configuration value, for configuration-argument factories.
    #[must_use]
    pub fn config(&self) -> Option<&Value> {
        match &self.kind {
            FactoryKind::Plain(_) => None,
            FactoryKind::Configured {
                config, ..
            } => Some(config.as_ref()),
        }
    }

    /// Returns true when both handles share the same build closure.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (FactoryKind::Plain(lhs), FactoryKind::Plain(rhs)) => Arc::ptr_eq(lhs, rhs),
            (
                FactoryKind::Configured {
                    config: lhs_config,
                    build: lhs,
                },
                FactoryKind::Configured {
                    config: rhs_config,
                    build: rhs,
                },
            ) => Arc::ptr_eq(lhs, rhs) && Arc::ptr_eq(lhs_config, rhs_config),
            _ => false,
        }
    }
}
