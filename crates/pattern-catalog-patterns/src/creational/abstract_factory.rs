// crates/pattern-catalog-patterns/src/creational/abstract_factory.rs
// ============================================================================
// Module: Abstract Factory Built-ins
// Description: Furniture and computer product families.
// Purpose: Create matching product sets per family.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A family table lists, for each family, the behavior of every product role.
//! Every family in one table fills the same roles.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::AbstractFactoryPattern;
use pattern_catalog_core::capabilities::Product;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

use super::product_value;

// ============================================================================
// SECTION: Family Tables
// ============================================================================

/// One family and the behavior of each of its products, keyed by role.
type Family = (&'static str, &'static [(&'static str, &'static str)]);

/// Modern and vintage furniture.
const FURNITURE: &[Family] = &[
    ("modern", &[("chair", "Sitting on a modern chair"), ("sofa", "Sitting on a modern sofa")]),
    ("vintage", &[("chair", "Sitting on a vintage chair"), ("sofa", "Sitting on a vintage sofa")]),
];

/// Gaming and office computer parts.
const COMPUTERS: &[Family] = &[
    ("gaming", &[("cpu", "Gaming CPU processing"), ("gpu", "Gaming GPU rendering")]),
    ("office", &[("cpu", "Office CPU processing"), ("gpu", "Office GPU rendering")]),
];

// ============================================================================
// SECTION: Family Factory
// ============================================================================

/// Abstract factory over a static family table.
#[derive(Debug, Clone, Copy)]
pub struct FamilyFactory {
    /// Families and their products.
    families: &'static [Family],
}

impl Scriptable for FamilyFactory {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "families" => Ok(json!(self.families())),
            "create_family" => {
                let family = args::string(operation, args, 0)?;
                let products = self.create_family(family)?;
                Ok(Value::Array(products.iter().map(product_value).collect()))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl AbstractFactoryPattern for FamilyFactory {
    fn families(&self) -> Vec<String> {
        self.families.iter().map(|(family, _)| (*family).to_string()).collect()
    }

    fn create_family(&self, family: &str) -> Result<Vec<Product>, PatternError> {
        let (name, products) = self
            .families
            .iter()
            .find(|(name, _)| *name == family)
            .ok_or_else(|| PatternError::rejected(format!("unknown family: {family}")))?;
        Ok(products
            .iter()
            .map(|(role, behavior)| Product {
                kind: (*role).to_string(),
                family: Some((*name).to_string()),
                detail: json!({ "behavior": behavior }),
            })
            .collect())
    }
}

/// Factory for modern and vintage chairs and sofas.
#[must_use]
pub fn furniture() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::abstract_factory(FamilyFactory {
            families: FURNITURE,
        }))
    })
}

/// Factory for gaming and office CPUs and GPUs.
#[must_use]
pub fn computer() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::abstract_factory(FamilyFactory {
            families: COMPUTERS,
        }))
    })
}
