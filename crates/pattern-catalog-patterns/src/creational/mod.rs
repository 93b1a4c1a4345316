// crates/pattern-catalog-patterns/src/creational/mod.rs
// ============================================================================
// Module: Creational Built-ins
// Description: Singleton, factory, builder, pool, and prototype examples.
// Purpose: Register creational entries against the standard contracts.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Every creational entry keeps its cross-construction state (a singleton's
//! one instance) inside the factory closure built here, so two registries
//! never share state.

pub mod abstract_factory;
pub mod builder;
pub mod factory_method;
pub mod object_pool;
pub mod prototype;
pub mod singleton;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use pattern_catalog_core::ContractBook;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RegistryError;
use pattern_catalog_core::capabilities::Product;
use serde_json::Value;
use serde_json::json;

use crate::BuiltinOptions;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers every creational built-in.
///
/// # Errors
///
/// Returns [`RegistryError`] when an entry name is already taken.
pub fn register(
    registry: &mut Registry,
    book: &ContractBook,
    options: &BuiltinOptions,
) -> Result<(), RegistryError> {
    let contract = book.get(PatternCategory::Singleton);
    registry.register(PatternCategory::Singleton, "logger", singleton::logger(), Arc::clone(&contract))?;
    registry.register(
        PatternCategory::Singleton,
        "database-connection",
        singleton::database_connection("mydb"),
        contract,
    )?;

    let contract = book.get(PatternCategory::Factory);
    registry.register(PatternCategory::Factory, "animal", factory_method::animal(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Factory, "shape", factory_method::shape(), contract)?;

    let contract = book.get(PatternCategory::AbstractFactory);
    registry.register(
        PatternCategory::AbstractFactory,
        "furniture",
        abstract_factory::furniture(),
        Arc::clone(&contract),
    )?;
    registry.register(
        PatternCategory::AbstractFactory,
        "computer",
        abstract_factory::computer(),
        contract,
    )?;

    let contract = book.get(PatternCategory::Builder);
    registry.register(PatternCategory::Builder, "meal", builder::meal(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Builder, "http-request", builder::http_request(), contract)?;

    let contract = book.get(PatternCategory::ObjectPool);
    registry.register(
        PatternCategory::ObjectPool,
        "database-connections",
        object_pool::database_connections(options.pool_max_size),
        Arc::clone(&contract),
    )?;
    registry.register(
        PatternCategory::ObjectPool,
        "image-pool",
        object_pool::image_pool(options.pool_max_size),
        contract,
    )?;

    let contract = book.get(PatternCategory::Prototype);
    registry.register(PatternCategory::Prototype, "circle", prototype::circle(), Arc::clone(&contract))?;
    registry.register(
        PatternCategory::Prototype,
        "vehicle-registry",
        prototype::vehicle_registry(),
        contract,
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// JSON view of a product for scripted output.
pub(crate) fn product_value(product: &Product) -> Value {
    json!({
        "kind": product.kind,
        "family": product.family,
        "detail": product.detail,
    })
}
