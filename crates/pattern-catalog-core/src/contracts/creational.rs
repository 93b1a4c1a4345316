// crates/pattern-catalog-core/src/contracts/creational.rs
// ============================================================================
// Module: Creational Contracts
// Description: Checks for Singleton, Factory, Abstract Factory, Builder,
//              Object Pool, and Prototype entries.
// Purpose: Encode creational invariants as independent, ordered checks.
// Dependencies: crate::{capabilities, contract, instance}, serde_json
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::capability;
use super::names;
use crate::capabilities::AbstractFactoryPattern;
use crate::capabilities::BuilderPattern;
use crate::capabilities::FactoryPattern;
use crate::capabilities::ObjectPoolPattern;
use crate::capabilities::PooledObject;
use crate::capabilities::PrototypePattern;
use crate::capabilities::ReleaseOutcome;
use crate::capabilities::SingletonPattern;
use crate::category::PatternCategory;
use crate::contract::CheckFailure;
use crate::contract::Contract;
use crate::contract::require;
use crate::instance::PatternInstance;

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Singleton capability of `instance`.
fn as_singleton(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn SingletonPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Singleton, PatternInstance::as_singleton_mut)
}

/// Factory capability of `instance`.
fn as_factory(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn FactoryPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Factory, PatternInstance::as_factory_mut)
}

/// Abstract factory capability of `instance`.
fn as_abstract_factory(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn AbstractFactoryPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::AbstractFactory, PatternInstance::as_abstract_factory_mut)
}

/// Builder capability of `instance`.
fn as_builder(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn BuilderPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Builder, PatternInstance::as_builder_mut)
}

/// Object pool capability of `instance`.
fn as_object_pool(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn ObjectPoolPattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::ObjectPool, PatternInstance::as_object_pool_mut)
}

/// Prototype capability of `instance`.
fn as_prototype(
    instance: &mut PatternInstance,
) -> Result<&mut (dyn PrototypePattern + 'static), CheckFailure> {
    capability(instance, PatternCategory::Prototype, PatternInstance::as_prototype_mut)
}

// ============================================================================
// SECTION: Singleton
// ============================================================================

/// Marker recorded and then retracted by the shared-state check.
const SHARED_STATE_MARKER: &str = "shared-state-check";

/// Singleton contract.
pub(super) fn singleton() -> Contract {
    Contract::new(PatternCategory::Singleton)
        .check("every handle refers to the same instance", |context| {
            let mut other = context.fresh()?;
            let other_key = as_singleton(&mut other)?.instance_key();
            let key = as_singleton(context.instance()?)?.instance_key();
            require(key == other_key, || {
                format!("two handles report different instances {key} and {other_key}")
            })
        })
        .check("state recorded through one handle is visible through another", |context| {
            let mut other = context.fresh()?;
            let handle = as_singleton(context.instance()?)?;
            let before = handle.records();
            handle.record(SHARED_STATE_MARKER);
            let other = as_singleton(&mut other)?;
            let records = other.records();
            let visible = records.iter().any(|record| record == SHARED_STATE_MARKER);
            let retracted = other.retract(SHARED_STATE_MARKER);
            require(visible, || {
                format!("second handle does not see the recorded entry: {}", names(&records))
            })?;
            require(retracted, || "second handle could not retract the recorded entry".to_string())?;
            let after = as_singleton(context.instance()?)?.records();
            require(after == before, || {
                format!("shared state changed from {} to {}", names(&before), names(&after))
            })
        })
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Factory contract.
pub(super) fn factory() -> Contract {
    Contract::new(PatternCategory::Factory)
        .check("every advertised kind can be created", |context| {
            let factory = as_factory(context.instance()?)?;
            let kinds = factory.kinds();
            require(!kinds.is_empty(), || "factory advertises no kinds".to_string())?;
            for kind in &kinds {
                let product = factory.create(kind, "probe")?;
                require(&product.kind == kind, || {
                    format!("requested {kind}, factory produced {}", product.kind)
                })?;
            }
            Ok(())
        })
        .check("unknown kinds are rejected", |context| {
            let factory = as_factory(context.instance()?)?;
            require(factory.create("__unknown__", "probe").is_err(), || {
                "factory accepted an unknown kind".to_string()
            })
        })
}

// ============================================================================
// SECTION: Abstract Factory
// ============================================================================

/// Abstract factory contract.
pub(super) fn abstract_factory() -> Contract {
    Contract::new(PatternCategory::AbstractFactory)
        .check("products belong to the requested family", |context| {
            let factory = as_abstract_factory(context.instance()?)?;
            let families = factory.families();
            require(!families.is_empty(), || "factory advertises no families".to_string())?;
            for family in &families {
                for product in factory.create_family(family)? {
                    require(product.family.as_deref() == Some(family.as_str()), || {
                        format!(
                            "family {family} produced {} from family {}",
                            product.kind,
                            product.family.as_deref().unwrap_or("none")
                        )
                    })?;
                }
            }
            Ok(())
        })
        .check("every family provides the same product roles", |context| {
            let factory = as_abstract_factory(context.instance()?)?;
            let mut roles = Vec::new();
            for family in factory.families() {
                let mut kinds: Vec<String> =
                    factory.create_family(&family)?.into_iter().map(|product| product.kind).collect();
                kinds.sort();
                require(!kinds.is_empty(), || format!("family {family} produced no products"))?;
                roles.push((family, kinds));
            }
            let Some((first_family, expected)) = roles.first() else {
                return Ok(());
            };
            for (family, kinds) in &roles {
                require(kinds == expected, || {
                    format!(
                        "family {family} provides {}, family {first_family} provides {}",
                        names(kinds),
                        names(expected)
                    )
                })?;
            }
            Ok(())
        })
        .check("unknown families are rejected", |context| {
            let factory = as_abstract_factory(context.instance()?)?;
            require(factory.create_family("__unknown__").is_err(), || {
                "factory accepted an unknown family".to_string()
            })
        })
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder contract.
pub(super) fn builder() -> Contract {
    Contract::new(PatternCategory::Builder)
        .check("unset parts are absent from the product", |context| {
            let builder = as_builder(context.instance()?)?;
            let parts = builder.parts();
            let Some((first, rest)) = parts.split_first() else {
                return Err(CheckFailure::new("builder declares no parts"));
            };
            builder.set_part(first, json!("contract"))?;
            let product = builder.build();
            require(product.get(first) == Some(&json!("contract")), || {
                format!("part {first} missing from the product")
            })?;
            for part in rest {
                require(product.get(part).is_none_or(Value::is_null), || {
                    format!("unset part {part} present in the product")
                })?;
            }
            Ok(())
        })
        .check("every set part appears and build resets the builder", |context| {
            let builder = as_builder(context.instance()?)?;
            let parts = builder.parts();
            for (index, part) in parts.iter().enumerate() {
                builder.set_part(part, json!(format!("part-{index}")))?;
            }
            let product = builder.build();
            for (index, part) in parts.iter().enumerate() {
                let expected = json!(format!("part-{index}"));
                require(product.get(part) == Some(&expected), || {
                    let actual = product.get(part).map_or_else(|| "missing".to_string(), Value::to_string);
                    format!("part {part} is {actual}, expected {expected}")
                })?;
            }
            let empty = builder.build();
            require(parts.iter().all(|part| empty.get(part).is_none_or(Value::is_null)), || {
                "builder kept parts after build".to_string()
            })
        })
        .check("unknown parts are rejected", |context| {
            let builder = as_builder(context.instance()?)?;
            require(builder.set_part("__unknown__", Value::Null).is_err(), || {
                "builder accepted an unknown part".to_string()
            })
        })
}

// ============================================================================
// SECTION: Object Pool
// ============================================================================

/// Checks out every idle object so later acquisitions start from an empty pool.
fn drain(pool: &mut dyn ObjectPoolPattern) -> Vec<PooledObject> {
    let idle = pool.available();
    (0..idle).map(|_| pool.acquire()).collect()
}

/// Maximum idle size, which must be at least one.
fn max_size(pool: &dyn ObjectPoolPattern) -> Result<usize, CheckFailure> {
    let max = pool.max_size();
    require(max >= 1, || "pool max size must be at least 1".to_string())?;
    Ok(max)
}

/// Object pool contract.
pub(super) fn object_pool() -> Contract {
    Contract::new(PatternCategory::ObjectPool)
        .check("acquire on an empty pool constructs a new object", |context| {
            let pool = as_object_pool(context.instance()?)?;
            drain(pool);
            let before = pool.created();
            pool.acquire();
            let after = pool.created();
            require(after == before + 1, || {
                format!("construction count went from {before} to {after}, expected one more")
            })
        })
        .check("a released object is reused without construction", |context| {
            let pool = as_object_pool(context.instance()?)?;
            drain(pool);
            let object = pool.acquire();
            pool.release(object);
            let before = pool.created();
            let again = pool.acquire();
            require(again == object, || {
                format!("released object {} but acquired {}", object.id, again.id)
            })?;
            require(pool.created() == before, || "reacquire constructed a new object".to_string())
        })
        .check("releases beyond the max size are discarded", |context| {
            let pool = as_object_pool(context.instance()?)?;
            let max = max_size(pool)?;
            drain(pool);
            let objects: Vec<PooledObject> = (0..=max).map(|_| pool.acquire()).collect();
            let outcomes: Vec<ReleaseOutcome> =
                objects.into_iter().map(|object| pool.release(object)).collect();
            let retained = outcomes.iter().filter(|outcome| **outcome == ReleaseOutcome::Retained).count();
            require(retained == max, || format!("retained {retained} objects, max size is {max}"))?;
            require(outcomes.last() == Some(&ReleaseOutcome::Discarded), || {
                "the release beyond max size was retained".to_string()
            })?;
            require(pool.available() == max, || {
                format!("{} idle objects after releases, expected {max}", pool.available())
            })
        })
        .check("an object released twice is handed out once", |context| {
            let pool = as_object_pool(context.instance()?)?;
            drain(pool);
            let object = pool.acquire();
            pool.release(object);
            let second = pool.release(object);
            require(second == ReleaseOutcome::Rejected, || {
                format!("second release of object {} was not rejected", object.id)
            })?;
            let first = pool.acquire();
            let next = pool.acquire();
            require(first != next, || format!("object {} was handed out twice", first.id))
        })
        .check("a warm pool serves max size acquisitions without construction", |context| {
            let pool = as_object_pool(context.instance()?)?;
            let max = max_size(pool)?;
            drain(pool);
            let warm: Vec<PooledObject> = (0..max).map(|_| pool.acquire()).collect();
            for object in warm {
                pool.release(object);
            }
            let before = pool.created();
            let reused: Vec<PooledObject> = (0..max).map(|_| pool.acquire()).collect();
            require(pool.created() == before, || {
                format!("{} acquisitions from a warm pool constructed objects", reused.len())
            })?;
            pool.acquire();
            require(pool.created() == before + 1, || {
                format!("acquisition {} did not construct exactly one object", max + 1)
            })
        })
}

// ============================================================================
// SECTION: Prototype
// ============================================================================

/// Value written by the independence check.
const PROTOTYPE_MARKER: &str = "__contract_changed__";

/// Prototype contract.
pub(super) fn prototype() -> Contract {
    Contract::new(PatternCategory::Prototype)
        .check("clones match the prototype", |context| {
            let prototype = as_prototype(context.instance()?)?;
            let clone = prototype.clone_prototype();
            let (original, copied) = (prototype.snapshot(), clone.snapshot());
            require(original == copied, || format!("clone {copied} differs from prototype {original}"))
        })
        .check("changing a clone leaves the prototype untouched", |context| {
            let prototype = as_prototype(context.instance()?)?;
            let original = prototype.snapshot();
            let Some(field) = original.as_object().and_then(|fields| fields.keys().next().cloned())
            else {
                return Err(CheckFailure::new("prototype snapshot has no fields"));
            };
            let mut clone = prototype.clone_prototype();
            clone.set_field(&field, json!(PROTOTYPE_MARKER))?;
            require(prototype.snapshot() == original, || {
                format!("setting {field} on the clone changed the prototype")
            })?;
            require(clone.snapshot() != original, || {
                format!("setting {field} on the clone had no effect")
            })
        })
}
