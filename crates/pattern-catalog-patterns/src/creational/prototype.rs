// crates/pattern-catalog-patterns/src/creational/prototype.rs
// ============================================================================
// Module: Prototype Built-ins
// Description: Cloneable shape and a registry of vehicle prototypes.
// Purpose: Create objects by copying a configured instance.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Prototypes keep their fields as a JSON object, so a clone is a deep copy
//! and the structural snapshot is the object itself. Only declared fields
//! can be overwritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::PrototypePattern;
use pattern_catalog_core::instance::args;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Field Prototype
// ============================================================================

/// Prototype whose state is a fixed set of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPrototype {
    /// Field values; the key set never changes after construction.
    fields: Map<String, Value>,
}

impl Scriptable for FieldPrototype {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "snapshot" => Ok(self.snapshot()),
            "clone" => Ok(self.clone_prototype().snapshot()),
            "get" => {
                let field = args::string(operation, args, 0)?;
                Ok(self.fields.get(field).cloned().unwrap_or(Value::Null))
            }
            "set" => {
                let field = args::string(operation, args, 0)?;
                let value = args::value(operation, args, 1)?.clone();
                self.set_field(field, value)?;
                Ok(self.snapshot())
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl PrototypePattern for FieldPrototype {
    fn snapshot(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    fn clone_prototype(&self) -> Box<dyn PrototypePattern> {
        Box::new(self.clone())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), PatternError> {
        let slot = self
            .fields
            .get_mut(field)
            .ok_or_else(|| PatternError::rejected(format!("unknown field: {field}")))?;
        *slot = value;
        Ok(())
    }
}

// ============================================================================
// SECTION: Prototype Registry
// ============================================================================

/// Named prototypes from which new vehicles are cloned.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRegistry {
    /// Registered prototypes by name.
    prototypes: Map<String, Value>,
}

impl VehicleRegistry {
    /// Clones the prototype registered as `name`.
    fn create(&self, name: &str) -> Result<Value, PatternError> {
        self.prototypes
            .get(name)
            .cloned()
            .ok_or_else(|| PatternError::rejected(format!("prototype with name {name} not found")))
    }
}

impl Scriptable for VehicleRegistry {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "create" => self.create(args::string(operation, args, 0)?),
            "register" => {
                let name = args::string(operation, args, 0)?;
                let prototype = args::value(operation, args, 1)?.clone();
                self.prototypes.insert(name.to_string(), prototype);
                Ok(Value::Null)
            }
            "names" => Ok(json!(self.prototypes.keys().collect::<Vec<_>>())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl PrototypePattern for VehicleRegistry {
    fn snapshot(&self) -> Value {
        Value::Object(self.prototypes.clone())
    }

    fn clone_prototype(&self) -> Box<dyn PrototypePattern> {
        Box::new(self.clone())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), PatternError> {
        let slot = self
            .prototypes
            .get_mut(field)
            .ok_or_else(|| PatternError::rejected(format!("prototype with name {field} not found")))?;
        *slot = value;
        Ok(())
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Circle prototype with radius 5.
#[must_use]
pub fn circle() -> Factory {
    Factory::new(|| {
        let mut fields = Map::new();
        fields.insert("type".to_string(), json!("Circle"));
        fields.insert("radius".to_string(), json!(5));
        Ok(PatternInstance::prototype(FieldPrototype {
            fields,
        }))
    })
}

/// Registry seeded with car and motorcycle prototypes.
#[must_use]
pub fn vehicle_registry() -> Factory {
    Factory::new(|| {
        let mut prototypes = Map::new();
        prototypes.insert("car".to_string(), json!({ "type": "Car", "wheels": 4 }));
        prototypes.insert("motorcycle".to_string(), json!({ "type": "Motorcycle", "wheels": 2 }));
        Ok(PatternInstance::prototype(VehicleRegistry {
            prototypes,
        }))
    })
}
