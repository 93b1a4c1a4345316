// crates/pattern-catalog-patterns/src/structural/module.rs
// ============================================================================
// Module: Module Built-ins
// Description: Counter and namespace modules.
// Purpose: Hide state behind a fixed set of public members.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Module state is private to each struct; the only way in is through the
//! member names listed by [`ModulePattern::public_members`]. Private helpers
//! are ordinary methods the scripting surface never exposes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::ModulePattern;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Counter
// ============================================================================

/// Counter whose count is only reachable through its members.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    /// Private count.
    count: i64,
}

impl Scriptable for Counter {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "increment" => {
                self.count += 1;
                Ok(json!(self.count))
            }
            "decrement" => {
                self.count -= 1;
                Ok(json!(self.count))
            }
            "get_count" => Ok(json!(self.count)),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl ModulePattern for Counter {
    fn public_members(&self) -> Vec<String> {
        crate::owned(&["increment", "decrement", "get_count"])
    }
}

// ============================================================================
// SECTION: Namespace
// ============================================================================

/// Namespace grouping public functions around a private helper.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// Private call counter.
    calls: u64,
}

impl Namespace {
    /// Private helper shared by the public functions.
    fn private_function(&mut self, caller: &str) -> String {
        self.calls += 1;
        format!("{caller} called private function (call {})", self.calls)
    }
}

impl Scriptable for Namespace {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "public_function_1" | "public_function_2" => Ok(json!(self.private_function(operation))),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl ModulePattern for Namespace {
    fn public_members(&self) -> Vec<String> {
        crate::owned(&["public_function_1", "public_function_2"])
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Counter starting at zero.
#[must_use]
pub fn counter() -> Factory {
    Factory::new(|| Ok(PatternInstance::module(Counter::default())))
}

/// Namespace with two public functions.
#[must_use]
pub fn namespace() -> Factory {
    Factory::new(|| Ok(PatternInstance::module(Namespace::default())))
}
