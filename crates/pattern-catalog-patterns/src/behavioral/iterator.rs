// crates/pattern-catalog-patterns/src/behavioral/iterator.rs
// ============================================================================
// Module: Iterator Built-ins
// Description: Cursors over fixed collections.
// Purpose: Traverse a collection without exposing its representation.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Cursor`] walks a collection front to back. Once exhausted it keeps
//! failing with [`PatternError::ExhaustedIterator`] instead of yielding a
//! placeholder value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::IteratorPattern;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Cursor
// ============================================================================

/// Forward cursor over owned values.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Collection being traversed.
    items: Vec<Value>,
    /// Index of the next element.
    position: usize,
}

impl Cursor {
    /// Creates a cursor positioned before the first element.
    #[must_use]
    pub const fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            position: 0,
        }
    }
}

impl Scriptable for Cursor {
    fn invoke(&mut self, operation: &str, _args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "next" => self.next_item(),
            "has_next" => Ok(json!(self.has_next())),
            "total" => Ok(json!(self.total())),
            "reset" => {
                self.position = 0;
                Ok(Value::Null)
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl IteratorPattern for Cursor {
    fn total(&self) -> usize {
        self.items.len()
    }

    fn has_next(&self) -> bool {
        self.position < self.items.len()
    }

    fn next_item(&mut self) -> Result<Value, PatternError> {
        let item = self.items.get(self.position).cloned().ok_or(PatternError::ExhaustedIterator)?;
        self.position += 1;
        Ok(item)
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Cursor over `[1, 2, 3]`.
#[must_use]
pub fn three_items() -> Factory {
    Factory::new(|| Ok(PatternInstance::iterator(Cursor::new(vec![json!(1), json!(2), json!(3)]))))
}

/// Cursor over three named items.
#[must_use]
pub fn collection() -> Factory {
    Factory::new(|| {
        let items = ["Item 1", "Item 2", "Item 3"].into_iter().map(Value::from).collect();
        Ok(PatternInstance::iterator(Cursor::new(items)))
    })
}
