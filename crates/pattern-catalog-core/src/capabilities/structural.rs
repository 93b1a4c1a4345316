// crates/pattern-catalog-core/src/capabilities/structural.rs
// ============================================================================
// Module: Structural Capabilities
// Description: Capability traits for composition and wrapping patterns.
// Purpose: Name the operations contracts rely on for structural entries.
// Dependencies: crate::{error, instance}, serde_json
// ============================================================================

//! ## Overview
//! Adapter, Bridge, Composite, Decorator, Facade, Module, and Proxy
//! capabilities. Decorators are expressed as [`Layer`] values so contracts can
//! regroup a composition without knowing the concrete wrapper types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::PatternError;
use crate::instance::Scriptable;

// ============================================================================
// SECTION: Decorator Types
// ============================================================================

/// Component that decorators wrap.
pub trait Component: Send {
    /// Computes the component result (rendered text, cost, ...).
    fn evaluate(&self) -> Value;
}

/// Owned, type-erased component.
pub type BoxedComponent = Box<dyn Component>;

/// Wrapping function shared by a layer and its compositions.
type WrapFn = dyn Fn(BoxedComponent) -> BoxedComponent + Send + Sync;

/// One decorator, or a pre-composed stack of decorators.
#[derive(Clone)]
pub struct Layer {
    /// Layer name; composed layers join names with `+`.
    name: String,
    /// Wraps a component.
    wrap: Arc<WrapFn>,
}

impl Layer {
    /// Creates a layer from a wrapping function.
    pub fn new<F>(name: impl Into<String>, wrap: F) -> Self
    where
        F: Fn(BoxedComponent) -> BoxedComponent + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            wrap: Arc::new(wrap),
        }
    }

    /// Layer that returns the component unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::new("identity", |component| component)
    }

    /// Layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wraps `component` with this layer.
    #[must_use]
    pub fn apply(&self, component: BoxedComponent) -> BoxedComponent {
        (self.wrap)(component)
    }

    /// Composes two layers: `self` is applied first, then `outer`.
    #[must_use]
    pub fn then(&self, outer: &Self) -> Self {
        let inner = Arc::clone(&self.wrap);
        let outer_wrap = Arc::clone(&outer.wrap);
        Self {
            name: format!("{}+{}", self.name, outer.name),
            wrap: Arc::new(move |component| outer_wrap(inner(component))),
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer").field("name", &self.name).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Adapter capability: presents several sources through one target shape.
pub trait AdapterPattern: Scriptable {
    /// Keys every adapted result carries.
    fn target_keys(&self) -> Vec<String>;

    /// Adapted source names.
    fn sources(&self) -> Vec<String>;

    /// Fetches from `source`, translated into the target shape.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown sources.
    fn fetch(&self, source: &str) -> Result<Value, PatternError>;
}

/// Bridge capability: any abstraction over any implementation.
pub trait BridgePattern: Scriptable {
    /// Abstraction names.
    fn abstractions(&self) -> Vec<String>;

    /// Implementation names.
    fn implementations(&self) -> Vec<String>;

    /// Runs `abstraction` against `implementation`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown names.
    fn operate(&mut self, abstraction: &str, implementation: &str) -> Result<Value, PatternError>;
}

/// Composite capability: uniform aggregation over a part/whole tree.
pub trait CompositePattern: Scriptable {
    /// Aggregate computed through the tree root.
    fn total(&self) -> u64;

    /// Values of every leaf, depth-first.
    fn leaf_totals(&self) -> Vec<u64>;

    /// Adds a leaf under the root.
    fn add_leaf(&mut self, name: &str, value: u64);
}

/// Decorator capability: a base component plus its decorator layers.
pub trait DecoratorPattern: Scriptable {
    /// Fresh undecorated component.
    fn base(&self) -> BoxedComponent;

    /// Decorator layers in application order (innermost first).
    fn layers(&self) -> Vec<Layer>;
}

/// Facade capability: high-level operations over several subsystems.
pub trait FacadePattern: Scriptable {
    /// Operations the facade exposes.
    fn operations(&self) -> Vec<String>;

    /// Performs an operation, returning the subsystem calls it made in order.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] for unknown operations.
    fn perform(&mut self, operation: &str) -> Result<Vec<String>, PatternError>;
}

/// Module capability: private state reachable only via public members.
///
/// Public members are invoked through [`Scriptable::invoke`] with no arguments.
pub trait ModulePattern: Scriptable {
    /// Names of the public members.
    fn public_members(&self) -> Vec<String>;
}

/// Proxy capability: controlled access to a lazily created real subject.
pub trait ProxyPattern: Scriptable {
    /// Returns true once the real subject exists.
    fn subject_created(&self) -> bool;

    /// Number of times the real subject was constructed.
    fn creations(&self) -> u32;

    /// Forwards a request to the real subject, creating it when needed.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Rejected`] when access is denied.
    fn request(&mut self) -> Result<Value, PatternError>;
}
