// crates/pattern-catalog-core/src/contracts/structural.rs
// ============================================================================
// Module: Structural Contracts
// Description: Checks for Decorator, Composite, Proxy, Adapter, Bridge,
//              Facade, and Module entries.
// Purpose: Encode structural invariants as independent, ordered checks.
// Dependencies: crate::{capabilities, contract, error, instance}
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::capability;
use super::names;
use crate::capabilities::AdapterPattern;
use crate::capabilities::BridgePattern;
use crate::capabilities::CompositePattern;
use crate::capabilities::DecoratorPattern;
use crate::capabilities::FacadePattern;
use crate::capabilities::Layer;
use crate::capabilities::ModulePattern;
use crate::capabilities::ProxyPattern;
use crate::category::PatternCategory;
use crate::contract::CheckFailure;
use crate::contract::Contract;
use crate::contract::require;
use crate::error::PatternError;
use crate::instance::PatternInstance;

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Decorator capability of `instance`.
fn as_decorator(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn DecoratorPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Decorator, PatternInstance::as_decorator_mut)
}

/// Composite capability of `instance`.
fn as_composite(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn CompositePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Composite, PatternInstance::as_composite_mut)
}

/// Proxy capability of `instance`.
fn as_proxy(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn ProxyPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Proxy, PatternInstance::as_proxy_mut)
}

/// Adapter capability of `instance`.
fn as_adapter(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn AdapterPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Adapter, PatternInstance::as_adapter_mut)
}

/// Bridge capability of `instance`.
fn as_bridge(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn BridgePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Bridge, PatternInstance::as_bridge_mut)
}

/// Facade capability of `instance`.
fn as_facade(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn FacadePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Facade, PatternInstance::as_facade_mut)
}

/// Module capability of `instance`.
fn as_module(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn ModulePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Module, PatternInstance::as_module_mut)
}

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Applies `layers` one after another to a fresh base component.
fn apply_sequentially(decorator: &dyn DecoratorPattern, layers: &[Layer]) -> serde_json::Value {
    layers.iter().fold(decorator.base(), |component, layer| layer.apply(component)).evaluate()
}

/// Decorator contract.
pub(super) fn decorator() -> Contract {
    Contract::new(PatternCategory::Decorator)
        .check("grouping of decorators does not change the result", |context| {
            let decorator = as_decorator(context.instance()?)?;
            let layers = decorator.layers();
            let sequential = apply_sequentially(decorator, &layers);
            let left = layers.iter().fold(Layer::identity(), |acc, layer| acc.then(layer));
            let right = layers.iter().rev().fold(Layer::identity(), |acc, layer| layer.then(&acc));
            let left_value = left.apply(decorator.base()).evaluate();
            let right_value = right.apply(decorator.base()).evaluate();
            require(left_value == sequential, || {
                format!("left-grouped {} gives {left_value}, sequential gives {sequential}", left.name())
            })?;
            require(right_value == sequential, || {
                format!(
                    "right-grouped {} gives {right_value}, sequential gives {sequential}",
                    right.name()
                )
            })
        })
        .check("decorating is deterministic", |context| {
            let decorator = as_decorator(context.instance()?)?;
            let layers = decorator.layers();
            let first = apply_sequentially(decorator, &layers);
            let second = apply_sequentially(decorator, &layers);
            require(first == second, || format!("the same stack gave {first} then {second}"))
        })
}

// ============================================================================
// SECTION: Composite
// ============================================================================

/// Value of the leaf added by the growth check.
const PROBE_LEAF_VALUE: u64 = 7;

/// Composite contract.
pub(super) fn composite() -> Contract {
    Contract::new(PatternCategory::Composite)
        .check("the root total equals the sum of its leaves", |context| {
            let tree = as_composite(context.instance()?)?;
            let total = tree.total();
            let sum: u64 = tree.leaf_totals().iter().sum();
            require(total == sum, || format!("root total {total} differs from leaf sum {sum}"))
        })
        .check("adding a leaf grows the total by its value", |context| {
            let tree = as_composite(context.instance()?)?;
            let before = tree.total();
            tree.add_leaf("contract-leaf", PROBE_LEAF_VALUE);
            let after = tree.total();
            require(after == before + PROBE_LEAF_VALUE, || {
                format!("total went from {before} to {after} after adding {PROBE_LEAF_VALUE}")
            })
        })
}

// ============================================================================
// SECTION: Proxy
// ============================================================================

/// Requests issued by the single-creation check.
const PROXY_REQUESTS: usize = 3;

/// Proxy contract.
pub(super) fn proxy() -> Contract {
    Contract::new(PatternCategory::Proxy)
        .check("the real subject is not created before the first request", |context| {
            let proxy = as_proxy(context.instance()?)?;
            require(!proxy.subject_created() && proxy.creations() == 0, || {
                "the real subject exists before any request".to_string()
            })
        })
        .check("the real subject is created once across requests", |context| {
            let proxy = as_proxy(context.instance()?)?;
            for _ in 0..PROXY_REQUESTS {
                proxy.request()?;
            }
            let creations = proxy.creations();
            require(proxy.subject_created() && creations == 1, || {
                format!("{PROXY_REQUESTS} requests created the real subject {creations} times")
            })
        })
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Adapter contract.
pub(super) fn adapter() -> Contract {
    Contract::new(PatternCategory::Adapter)
        .check("every source is adapted to the target shape", |context| {
            let adapter = as_adapter(context.instance()?)?;
            let mut target = adapter.target_keys();
            target.sort();
            let sources = adapter.sources();
            require(!sources.is_empty(), || "adapter advertises no sources".to_string())?;
            for source in &sources {
                let value = adapter.fetch(source)?;
                let Some(fields) = value.as_object() else {
                    return Err(CheckFailure::new(format!("source {source} produced {value}")));
                };
                let mut keys: Vec<String> = fields.keys().cloned().collect();
                keys.sort();
                require(keys == target, || {
                    format!("source {source} produced keys {}, expected {}", names(&keys), names(&target))
                })?;
            }
            Ok(())
        })
        .check("unknown sources are rejected", |context| {
            let adapter = as_adapter(context.instance()?)?;
            require(adapter.fetch("__unknown__").is_err(), || {
                "adapter accepted an unknown source".to_string()
            })
        })
}

// ============================================================================
// SECTION: Bridge
// ============================================================================

/// Bridge contract.
pub(super) fn bridge() -> Contract {
    Contract::new(PatternCategory::Bridge)
        .check("every abstraction works with every implementation", |context| {
            let bridge = as_bridge(context.instance()?)?;
            let abstractions = bridge.abstractions();
            let implementations = bridge.implementations();
            require(!abstractions.is_empty() && !implementations.is_empty(), || {
                "bridge needs at least one abstraction and one implementation".to_string()
            })?;
            for abstraction in &abstractions {
                for implementation in &implementations {
                    bridge.operate(abstraction, implementation).map_err(|error| {
                        CheckFailure::new(format!("{abstraction} over {implementation}: {error}"))
                    })?;
                }
            }
            Ok(())
        })
        .check("unknown abstractions are rejected", |context| {
            let bridge = as_bridge(context.instance()?)?;
            let Some(implementation) = bridge.implementations().into_iter().next() else {
                return Err(CheckFailure::new("bridge advertises no implementations"));
            };
            require(bridge.operate("__unknown__", &implementation).is_err(), || {
                "bridge accepted an unknown abstraction".to_string()
            })
        })
}

// ============================================================================
// SECTION: Facade
// ============================================================================

/// Facade contract.
pub(super) fn facade() -> Contract {
    Contract::new(PatternCategory::Facade)
        .check("every operation calls at least one subsystem", |context| {
            let facade = as_facade(context.instance()?)?;
            let operations = facade.operations();
            require(!operations.is_empty(), || "facade advertises no operations".to_string())?;
            for operation in &operations {
                let calls = facade.perform(operation)?;
                require(!calls.is_empty(), || format!("operation {operation} called no subsystem"))?;
            }
            Ok(())
        })
        .check("operations repeat the same subsystem calls", |context| {
            let facade = as_facade(context.instance()?)?;
            for operation in facade.operations() {
                let first = facade.perform(&operation)?;
                let second = facade.perform(&operation)?;
                require(first == second, || {
                    format!("operation {operation} called {} then {}", names(&first), names(&second))
                })?;
            }
            Ok(())
        })
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Member name no module exposes.
const PRIVATE_MEMBER: &str = "__private__";

/// Module contract.
pub(super) fn module() -> Contract {
    Contract::new(PatternCategory::Module)
        .check("every public member is callable", |context| {
            let module = as_module(context.instance()?)?;
            let members = module.public_members();
            require(!members.is_empty(), || "module exposes no members".to_string())?;
            for member in &members {
                module.invoke(member, &[])?;
            }
            Ok(())
        })
        .check("private members are unreachable", |context| {
            let module = as_module(context.instance()?)?;
            let outcome = module.invoke(PRIVATE_MEMBER, &[]);
            require(matches!(outcome, Err(PatternError::UnknownOperation { .. })), || {
                format!("{PRIVATE_MEMBER} was reachable through the public surface")
            })
        })
}
