// crates/pattern-catalog-patterns/src/creational/factory_method.rs
// ============================================================================
// Module: Factory Built-ins
// Description: Animal and shape factories.
// Purpose: Create products by kind from a static product table.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`ProductFactory`] maps each kind to a constructor function. Unknown
//! kinds are rejected rather than defaulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::FactoryPattern;
use pattern_catalog_core::capabilities::Product;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

use super::product_value;

// ============================================================================
// SECTION: Product Tables
// ============================================================================

/// One creatable kind.
#[derive(Clone, Copy)]
struct ProductKind {
    /// Kind name.
    kind: &'static str,
    /// Builds the product detail for a label.
    detail: fn(&str) -> Value,
}

/// Animals and the sound each makes.
const ANIMALS: &[ProductKind] = &[
    ProductKind {
        kind: "dog",
        detail: |name| json!({ "name": name, "sound": "Woof!" }),
    },
    ProductKind {
        kind: "cat",
        detail: |name| json!({ "name": name, "sound": "Meow!" }),
    },
];

/// Shapes with fixed demonstration dimensions.
const SHAPES: &[ProductKind] = &[
    ProductKind {
        kind: "circle",
        detail: |label| json!({ "label": label, "radius": 5, "drawing": "Drawing a circle with radius 5" }),
    },
    ProductKind {
        kind: "square",
        detail: |label| json!({ "label": label, "side_length": 4, "drawing": "Drawing a square with side length 4" }),
    },
    ProductKind {
        kind: "triangle",
        detail: |label| json!({ "label": label, "base": 3, "height": 6, "drawing": "Drawing a triangle with base 3 and height 6" }),
    },
];

// ============================================================================
// SECTION: Product Factory
// ============================================================================

/// Factory over a static product table.
#[derive(Clone, Copy)]
pub struct ProductFactory {
    /// Creatable kinds.
    table: &'static [ProductKind],
}

impl Scriptable for ProductFactory {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "kinds" => Ok(json!(self.kinds())),
            "create" => {
                let kind = args::string(operation, args, 0)?;
                let label = args.get(1).and_then(Value::as_str).unwrap_or(kind);
                Ok(product_value(&self.create(kind, label)?))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl FactoryPattern for ProductFactory {
    fn kinds(&self) -> Vec<String> {
        self.table.iter().map(|entry| entry.kind.to_string()).collect()
    }

    fn create(&self, kind: &str, label: &str) -> Result<Product, PatternError> {
        let entry = self
            .table
            .iter()
            .find(|entry| entry.kind == kind)
            .ok_or_else(|| PatternError::rejected(format!("unsupported kind: {kind}")))?;
        Ok(Product {
            kind: entry.kind.to_string(),
            family: None,
            detail: (entry.detail)(label),
        })
    }
}

/// Factory creating dogs and cats.
#[must_use]
pub fn animal() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::factory(ProductFactory {
            table: ANIMALS,
        }))
    })
}

/// Factory creating circles, squares, and triangles.
#[must_use]
pub fn shape() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::factory(ProductFactory {
            table: SHAPES,
        }))
    })
}
