// crates/pattern-catalog-patterns/src/creational/builder.rs
// ============================================================================
// Module: Builder Built-ins
// Description: Meal and HTTP request builders.
// Purpose: Assemble products part by part with optional parts left empty.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`PartBuilder`] accepts any JSON value for a declared part. `build`
//! returns the parts set since the previous build and starts over, so one
//! builder can assemble several independent products.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::BuilderPattern;
use pattern_catalog_core::instance::args;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::owned;

// ============================================================================
// SECTION: Part Builder
// ============================================================================

/// Builder over a fixed list of optional parts.
#[derive(Debug, Clone)]
pub struct PartBuilder {
    /// Declared parts in display order.
    parts: &'static [&'static str],
    /// Parts set since the last build.
    pending: Map<String, Value>,
}

impl PartBuilder {
    /// Creates an empty builder for `parts`.
    fn new(parts: &'static [&'static str]) -> Self {
        Self {
            parts,
            pending: Map::new(),
        }
    }
}

impl Scriptable for PartBuilder {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "parts" => Ok(json!(self.parts())),
            "set" => {
                let part = args::string(operation, args, 0)?;
                let value = args::value(operation, args, 1)?.clone();
                self.set_part(part, value)?;
                Ok(Value::Null)
            }
            "build" => Ok(Value::Object(self.build())),
            other => match other.strip_prefix("add_") {
                Some(part) if self.parts.contains(&part) => {
                    let value = args::value(operation, args, 0)?.clone();
                    self.set_part(part, value)?;
                    Ok(Value::Null)
                }
                _ => Err(PatternError::unknown_operation(other)),
            },
        }
    }
}

impl BuilderPattern for PartBuilder {
    fn parts(&self) -> Vec<String> {
        owned(self.parts)
    }

    fn set_part(&mut self, part: &str, value: Value) -> Result<(), PatternError> {
        if !self.parts.contains(&part) {
            return Err(PatternError::rejected(format!("unknown part: {part}")));
        }
        self.pending.insert(part.to_string(), value);
        Ok(())
    }

    fn build(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.pending)
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Meal parts.
const MEAL_PARTS: &[&str] = &["burger", "fries", "drink"];

/// HTTP request parts.
const REQUEST_PARTS: &[&str] = &["method", "url", "headers", "body"];

/// Builder for burger meals; every part is optional.
#[must_use]
pub fn meal() -> Factory {
    Factory::new(|| Ok(PatternInstance::builder(PartBuilder::new(MEAL_PARTS))))
}

/// Builder for HTTP request descriptions.
#[must_use]
pub fn http_request() -> Factory {
    Factory::new(|| Ok(PatternInstance::builder(PartBuilder::new(REQUEST_PARTS))))
}
