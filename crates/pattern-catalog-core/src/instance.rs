// crates/pattern-catalog-core/src/instance.rs
// ============================================================================
// Module: Pattern Instances
// Description: Tagged instance variant and the scriptable operation surface.
// Purpose: Dispatch on a declared category tag instead of runtime type tests.
// Dependencies: crate::{capabilities, category, error}, serde_json
// ============================================================================

//! ## Overview
//! A factory produces a [`PatternInstance`]: one variant per
//! [`PatternCategory`], each holding a boxed implementation of that category's
//! capability trait. Contracts reach the typed capability through the
//! `as_*_mut` accessors; the example runner reaches the string-named
//! operation surface through [`PatternInstance::scriptable_mut`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::capabilities::AbstractFactoryPattern;
use crate::capabilities::AdapterPattern;
use crate::capabilities::BridgePattern;
use crate::capabilities::BuilderPattern;
use crate::capabilities::CommandPattern;
use crate::capabilities::CompositePattern;
use crate::capabilities::DecoratorPattern;
use crate::capabilities::FacadePattern;
use crate::capabilities::FactoryPattern;
use crate::capabilities::IteratorPattern;
use crate::capabilities::MediatorPattern;
use crate::capabilities::ModulePattern;
use crate::capabilities::ObjectPoolPattern;
use crate::capabilities::ObserverPattern;
use crate::capabilities::PrototypePattern;
use crate::capabilities::ProxyPattern;
use crate::capabilities::SingletonPattern;
use crate::capabilities::StatePattern;
use crate::capabilities::StrategyPattern;
use crate::capabilities::VisitorPattern;
use crate::category::PatternCategory;
use crate::error::PatternError;

// ============================================================================
// SECTION: Scriptable Surface
// ============================================================================

/// Operation surface shared by every pattern implementation.
pub trait Scriptable: Send {
    /// Applies a named operation and returns its observable output.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownOperation`] for unsupported operation
    /// names and other [`PatternError`] variants for operation failures.
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError>;
}

// ============================================================================
// SECTION: Argument Helpers
// ============================================================================

/// Argument accessors for [`Scriptable::invoke`] implementations.
pub mod args {
    use serde_json::Value;

    use crate::error::PatternError;

    /// Returns the argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidArgument`] when the argument is missing.
    pub fn value<'a>(
        operation: &str,
        args: &'a [Value],
        index: usize,
    ) -> Result<&'a Value, PatternError> {
        args.get(index).ok_or_else(|| {
            PatternError::invalid_argument(operation, format!("missing argument {index}"))
        })
    }

    /// Returns the string argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidArgument`] when the argument is missing
    /// or not a string.
    pub fn string<'a>(
        operation: &str,
        args: &'a [Value],
        index: usize,
    ) -> Result<&'a str, PatternError> {
        value(operation, args, index)?.as_str().ok_or_else(|| {
            PatternError::invalid_argument(operation, format!("argument {index} must be a string"))
        })
    }

    /// Returns the unsigned integer argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidArgument`] when the argument is missing
    /// or not an unsigned integer.
    pub fn unsigned(operation: &str, args: &[Value], index: usize) -> Result<u64, PatternError> {
        value(operation, args, index)?.as_u64().ok_or_else(|| {
            PatternError::invalid_argument(
                operation,
                format!("argument {index} must be an unsigned integer"),
            )
        })
    }
}

// ============================================================================
// SECTION: Instance Variant
// ============================================================================

/// Declares [`PatternInstance`] with one variant per category.
macro_rules! pattern_instances {
    ($($(#[$meta:meta])* $variant:ident($ctor:ident, $accessor:ident) => $capability:ident),* $(,)?) => {
        /// Live pattern instance tagged with its category.
        pub enum PatternInstance {
            $(
                $(#[$meta])*
                $variant(Box<dyn $capability>),
            )*
        }

        impl PatternInstance {
            /// Category declared by the variant tag.
            #[must_use]
            pub const fn category(&self) -> PatternCategory {
                match self {
                    $(Self::$variant(_) => PatternCategory::$variant,)*
                }
            }

            /// Operation surface of the wrapped implementation.
            pub fn scriptable_mut(&mut self) -> &mut dyn Scriptable {
                match self {
                    $(
                        Self::$variant(inner) => {
                            let scriptable: &mut dyn Scriptable = inner.as_mut();
                            scriptable
                        }
                    )*
                }
            }

            $(
                /// Wraps an implementation in its category variant.
                pub fn $ctor(implementation: impl $capability + 'static) -> Self {
                    Self::$variant(Box::new(implementation))
                }

                /// Returns the typed capability when the variant matches.
                pub fn $accessor(&mut self) -> Option<&mut (dyn $capability + 'static)> {
                    match self {
                        Self::$variant(inner) => Some(inner.as_mut()),
                        #[allow(unreachable_patterns, reason = "macro expands one arm per variant")]
                        _ => None,
                    }
                }
            )*
        }
    };
}

pattern_instances! {
    /// Singleton handle.
    Singleton(singleton, as_singleton_mut) => SingletonPattern,
    /// Observer subject.
    Observer(observer, as_observer_mut) => ObserverPattern,
    /// Command invoker.
    Command(command, as_command_mut) => CommandPattern,
    /// Product factory.
    Factory(factory, as_factory_mut) => FactoryPattern,
    /// Decorator stack.
    Decorator(decorator, as_decorator_mut) => DecoratorPattern,
    /// Composite tree.
    Composite(composite, as_composite_mut) => CompositePattern,
    /// Proxy.
    Proxy(proxy, as_proxy_mut) => ProxyPattern,
    /// State context.
    State(state, as_state_mut) => StatePattern,
    /// Strategy context.
    Strategy(strategy, as_strategy_mut) => StrategyPattern,
    /// Visitor over an element structure.
    Visitor(visitor, as_visitor_mut) => VisitorPattern,
    /// Mediator hub.
    Mediator(mediator, as_mediator_mut) => MediatorPattern,
    /// Iterator.
    Iterator(iterator, as_iterator_mut) => IteratorPattern,
    /// Adapter.
    Adapter(adapter, as_adapter_mut) => AdapterPattern,
    /// Bridge.
    Bridge(bridge, as_bridge_mut) => BridgePattern,
    /// Facade.
    Facade(facade, as_facade_mut) => FacadePattern,
    /// Builder.
    Builder(builder, as_builder_mut) => BuilderPattern,
    /// Abstract factory.
    AbstractFactory(abstract_factory, as_abstract_factory_mut) => AbstractFactoryPattern,
    /// Object pool.
    ObjectPool(object_pool, as_object_pool_mut) => ObjectPoolPattern,
    /// Prototype.
    Prototype(prototype, as_prototype_mut) => PrototypePattern,
    /// Module.
    Module(module, as_module_mut) => ModulePattern,
}
