// crates/pattern-catalog-patterns/src/structural/facade.rs
// ============================================================================
// Module: Facade Built-ins
// Description: Home theater and online shopping facades.
// Purpose: Offer one call that coordinates several subsystems.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Facade`] maps each high-level operation to an ordered script of
//! subsystem calls. Performing an operation replays the script and records
//! every call so callers can see what the facade hid from them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::FacadePattern;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Facade
// ============================================================================

/// Subsystem call: subsystem name and action.
type Call = (&'static str, &'static str);

/// High-level operation and the calls it expands to.
type Operation = (&'static str, &'static [Call]);

/// Facade over simulated subsystems.
#[derive(Debug, Clone)]
pub struct Facade {
    /// Operation table.
    operations: &'static [Operation],
    /// Every call made so far.
    journal: Vec<String>,
}

impl Facade {
    /// Creates a facade with an empty journal.
    const fn new(operations: &'static [Operation]) -> Self {
        Self {
            operations,
            journal: Vec::new(),
        }
    }
}

impl Scriptable for Facade {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "operations" => Ok(json!(self.operations())),
            "journal" => Ok(json!(self.journal)),
            other if self.operations.iter().any(|(name, _)| *name == other) => {
                Ok(json!(self.perform(other)?))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl FacadePattern for Facade {
    fn operations(&self) -> Vec<String> {
        self.operations.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn perform(&mut self, operation: &str) -> Result<Vec<String>, PatternError> {
        let (_, script) = self
            .operations
            .iter()
            .find(|(name, _)| *name == operation)
            .ok_or_else(|| PatternError::rejected(format!("unknown facade operation: {operation}")))?;
        let calls: Vec<String> =
            script.iter().map(|(subsystem, action)| format!("{subsystem}: {action}")).collect();
        self.journal.extend(calls.iter().cloned());
        Ok(calls)
    }
}

// ============================================================================
// SECTION: Scripts
// ============================================================================

/// Home theater operations.
const HOME_THEATER: &[Operation] = &[
    (
        "watch_movie",
        &[
            ("Projector", "on"),
            ("Projector", "input DVD"),
            ("SoundSystem", "on"),
            ("SoundSystem", "volume 10"),
            ("DVDPlayer", "on"),
            ("DVDPlayer", "play movie"),
        ],
    ),
    (
        "end_movie",
        &[("DVDPlayer", "stop"), ("DVDPlayer", "off"), ("SoundSystem", "off"), ("Projector", "off")],
    ),
];

/// Online shopping operations.
const ONLINE_SHOPPING: &[Operation] = &[(
    "purchase",
    &[
        ("Inventory", "check stock"),
        ("Inventory", "reserve item"),
        ("Payment", "charge card"),
        ("Shipping", "schedule delivery"),
    ],
)];

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Facade over projector, sound system, and DVD player.
#[must_use]
pub fn home_theater() -> Factory {
    Factory::new(|| Ok(PatternInstance::facade(Facade::new(HOME_THEATER))))
}

/// Facade over inventory, payment, and shipping.
#[must_use]
pub fn online_shopping() -> Factory {
    Factory::new(|| Ok(PatternInstance::facade(Facade::new(ONLINE_SHOPPING))))
}
