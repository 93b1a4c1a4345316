// crates/pattern-catalog-patterns/src/behavioral/mod.rs
// ============================================================================
// Module: Behavioral Built-ins
// Description: Observer, command, state, strategy, visitor, mediator, and
//              iterator examples.
// Purpose: Register behavioral entries against the standard contracts.
// Dependencies: pattern-catalog-core
// ============================================================================

//! ## Overview
//! Behavioral entries report what they did as JSON values (deliveries,
//! transitions, payment receipts) instead of printing, so scripted runs and
//! contracts observe the same behavior.

pub mod command;
pub mod iterator;
pub mod mediator;
pub mod observer;
pub mod state;
pub mod strategy;
pub mod visitor;

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

/// Registers every behavioral built-in.
///
/// # Errors
///
/// Returns [`RegistryError`] when an entry name is already taken.
pub fn register(registry: &mut Registry, book: &ContractBook) -> Result<(), RegistryError> {
    let contract = book.get(PatternCategory::Observer);
    registry.register(
        PatternCategory::Observer,
        "stock-market",
        observer::stock_market(),
        Arc::clone(&contract),
    )?;
    registry.register(PatternCategory::Observer, "weather-station", observer::weather_station(), contract)?;

    let contract = book.get(PatternCategory::Command);
    registry.register(PatternCategory::Command, "light-switch", command::light_switch(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Command, "drawing", command::drawing(), contract)?;

    let contract = book.get(PatternCategory::State);
    registry.register(PatternCategory::State, "traffic-light", state::traffic_light(), Arc::clone(&contract))?;
    registry.register(PatternCategory::State, "fan", state::fan(), contract)?;

    let contract = book.get(PatternCategory::Strategy);
    registry.register(PatternCategory::Strategy, "payment", strategy::payment(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Strategy, "sorting", strategy::sorting(), contract)?;

    let contract = book.get(PatternCategory::Visitor);
    registry.register(
        PatternCategory::Visitor,
        "document-export",
        visitor::document_export(),
        Arc::clone(&contract),
    )?;
    registry.register(PatternCategory::Visitor, "shape-metrics", visitor::shape_metrics(), contract)?;

    let contract = book.get(PatternCategory::Mediator);
    registry.register(PatternCategory::Mediator, "chat-room", mediator::chat_room(), Arc::clone(&contract))?;
    registry.register(
        PatternCategory::Mediator,
        "air-traffic-control",
        mediator::air_traffic_control(),
        contract,
    )?;

    let contract = book.get(PatternCategory::Iterator);
    registry.register(PatternCategory::Iterator, "three-items", iterator::three_items(), Arc::clone(&contract))?;
    registry.register(PatternCategory::Iterator, "collection", iterator::collection(), contract)?;
    Ok(())
}
