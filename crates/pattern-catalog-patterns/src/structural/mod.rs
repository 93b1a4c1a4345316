// crates/pattern-catalog-patterns/src/structural/mod.rs
// ============================================================================
// Module: Structural Built-ins
// Description: Decorator, composite, proxy, adapter, bridge, facade, and
//              module examples.
// Purpose: Register structural entries against the standard contracts.
// Dependencies: pattern-catalog-core
// ============================================================================

//! ## Overview
//! Structural entries compose or wrap other objects. Subsystems and real
//! subjects are simulated in memory and report their calls as data.

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod decorator;
pub mod facade;
pub mod module;
pub mod proxy;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use pattern_catalog_core::ContractBook;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RegistryError;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers every structural built-in.
///
/// # Errors
///
/// Returns [`RegistryError`] when an entry name is already taken.
pub fn register(registry: &mut Registry, book: &ContractBook) -> Result<(), RegistryError> {
    let contract = book.get(PatternCategory::Decorator);
    registry.register(PatternCategory::Decorator, "coffee", decorator::coffee(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Decorator, "ui-component", decorator::ui_component(), contract)?;

    let contract = book.get(PatternCategory::Composite);
    registry.register(PatternCategory::Composite, "directory", composite::directory(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Composite, "graphics", composite::graphics(), contract)?;

    let contract = book.get(PatternCategory::Proxy);
    registry.register(PatternCategory::Proxy, "image-loading", proxy::image_loading(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Proxy, "bank-account", proxy::bank_account(), contract)?;

    let contract = book.get(PatternCategory::Adapter);
    registry.register(PatternCategory::Adapter, "data-fetching", adapter::data_fetching(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Adapter, "charting", adapter::charting(), contract)?;

    let contract = book.get(PatternCategory::Bridge);
    registry.register(PatternCategory::Bridge, "remote-control", bridge::remote_control(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Bridge, "shape-drawing", bridge::shape_drawing(), contract)?;

    let contract = book.get(PatternCategory::Facade);
    registry.register(PatternCategory::Facade, "home-theater", facade::home_theater(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Facade, "online-shopping", facade::online_shopping(), contract)?;

    let contract = book.get(PatternCategory::Module);
    registry.register(PatternCategory::Module, "counter", module::counter(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Module, "namespace", module::namespace(), contract)?;
    Ok(())
}
