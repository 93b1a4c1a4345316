// crates/pattern-catalog-patterns/src/structural/decorator.rs
// ============================================================================
// Module: Decorator Built-ins
// Description: Coffee add-ons and UI component styling.
// Purpose: Add behavior by wrapping a component in layers.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Each decorator is a [`Layer`] wrapping any [`Component`]. Layers compose
//! by function composition, so grouping never changes the result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::BoxedComponent;
use pattern_catalog_core::capabilities::Component;
use pattern_catalog_core::capabilities::DecoratorPattern;
use pattern_catalog_core::capabilities::Layer;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Stack
// ============================================================================

/// Base component plus the decorators applied to it.
pub struct DecoratorStack {
    /// Builds a fresh undecorated component.
    base: fn() -> BoxedComponent,
    /// Decorators, innermost first.
    layers: Vec<Layer>,
}

impl DecoratorStack {
    /// Evaluates the base with every layer applied.
    fn decorated(&self) -> Value {
        self.layers.iter().fold(self.base(), |component, layer| layer.apply(component)).evaluate()
    }
}

impl Scriptable for DecoratorStack {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "base" => Ok(self.base().evaluate()),
            "decorated" => Ok(self.decorated()),
            "layers" => Ok(json!(self.layers.iter().map(Layer::name).collect::<Vec<_>>())),
            "steps" => {
                let mut component = self.base();
                let mut steps = vec![component.evaluate()];
                for layer in &self.layers {
                    component = layer.apply(component);
                    steps.push(component.evaluate());
                }
                Ok(Value::Array(steps))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl DecoratorPattern for DecoratorStack {
    fn base(&self) -> BoxedComponent {
        (self.base)()
    }

    fn layers(&self) -> Vec<Layer> {
        self.layers.clone()
    }
}

// ============================================================================
// SECTION: Coffee
// ============================================================================

/// Priced drink.
struct Priced {
    /// Price in dollars.
    cost: u64,
    /// Ingredients, base first.
    description: Vec<&'static str>,
}

impl Component for Priced {
    fn evaluate(&self) -> Value {
        json!({ "cost": self.cost, "description": self.description.join(" + ") })
    }
}

/// Decorator adding an ingredient and its price.
struct AddOn {
    /// Wrapped drink.
    inner: BoxedComponent,
    /// Ingredient name.
    name: &'static str,
    /// Extra cost.
    cost: u64,
}

impl Component for AddOn {
    fn evaluate(&self) -> Value {
        let inner = self.inner.evaluate();
        let cost = inner.get("cost").and_then(Value::as_u64).unwrap_or_default() + self.cost;
        let description = inner.get("description").and_then(Value::as_str).unwrap_or_default();
        json!({ "cost": cost, "description": format!("{description} + {}", self.name) })
    }
}

/// Layer adding `name` at `cost`.
fn add_on(name: &'static str, cost: u64) -> Layer {
    Layer::new(name, move |inner| {
        Box::new(AddOn {
            inner,
            name,
            cost,
        })
    })
}

/// Simple coffee.
fn simple_coffee() -> BoxedComponent {
    Box::new(Priced {
        cost: 5,
        description: vec!["coffee"],
    })
}

// ============================================================================
// SECTION: UI Components
// ============================================================================

/// Rendered UI text.
struct Rendered(&'static str);

impl Component for Rendered {
    fn evaluate(&self) -> Value {
        json!(self.0)
    }
}

/// Decorator prefixing the rendered output.
struct Styled {
    /// Wrapped component.
    inner: BoxedComponent,
    /// Style label.
    style: &'static str,
}

impl Component for Styled {
    fn evaluate(&self) -> Value {
        let inner = self.inner.evaluate();
        json!(format!("{} + {}", self.style, inner.as_str().unwrap_or_default()))
    }
}

/// Layer rendering `style` around the component.
fn styled(style: &'static str) -> Layer {
    Layer::new(style, move |inner| {
        Box::new(Styled {
            inner,
            style,
        })
    })
}

/// Undecorated UI component.
fn basic_component() -> BoxedComponent {
    Box::new(Rendered("Basic UI Component"))
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Coffee priced 5, with milk (+2) and sugar (+1).
#[must_use]
pub fn coffee() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::decorator(DecoratorStack {
            base: simple_coffee,
            layers: vec![add_on("milk", 2), add_on("sugar", 1)],
        }))
    })
}

/// UI component with a border and a red color.
#[must_use]
pub fn ui_component() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::decorator(DecoratorStack {
            base: basic_component,
            layers: vec![styled("Border"), styled("Color(red)")],
        }))
    })
}
