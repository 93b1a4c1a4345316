// crates/pattern-catalog-patterns/src/behavioral/strategy.rs
// ============================================================================
// Module: Strategy Built-ins
// Description: Payment methods and sorting algorithms.
// Purpose: Swap the algorithm behind one context at runtime.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`StrategyContext`] owns a table of named algorithms and the index of
//! the selected one. The sorting strategies really sort: bubble, quick, and
//! merge sort all produce the same ascending order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::StrategyPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Algorithm signature shared by a context's strategies.
type Algorithm = fn(&Value) -> Result<Value, PatternError>;

/// Context selecting one algorithm from a table.
#[derive(Clone, Copy)]
pub struct StrategyContext {
    /// Named algorithms.
    table: &'static [(&'static str, Algorithm)],
    /// Index of the selected algorithm.
    selected: usize,
    /// Input accepted by every algorithm in the table.
    sample: fn() -> Value,
}

impl Scriptable for StrategyContext {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "strategies" => Ok(json!(self.strategies())),
            "select" => {
                self.select(args::string(operation, args, 0)?)?;
                Ok(Value::Null)
            }
            "selected" => Ok(json!(self.table.get(self.selected).map(|(name, _)| *name))),
            "execute" => match args.first() {
                Some(input) => self.execute(input),
                None => self.execute(&self.sample_input()),
            },
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl StrategyPattern for StrategyContext {
    fn strategies(&self) -> Vec<String> {
        self.table.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn select(&mut self, strategy: &str) -> Result<(), PatternError> {
        self.selected = self
            .table
            .iter()
            .position(|(name, _)| *name == strategy)
            .ok_or_else(|| PatternError::rejected(format!("unknown strategy: {strategy}")))?;
        Ok(())
    }

    fn execute(&self, input: &Value) -> Result<Value, PatternError> {
        let (_, algorithm) = self
            .table
            .get(self.selected)
            .ok_or_else(|| PatternError::rejected("no strategy selected"))?;
        algorithm(input)
    }

    fn sample_input(&self) -> Value {
        (self.sample)()
    }
}

// ============================================================================
// SECTION: Payment
// ============================================================================

/// Sums the `price` of every cart item.
fn cart_total(cart: &Value) -> Result<u64, PatternError> {
    let items = cart
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| PatternError::invalid_argument("execute", "cart requires an items array"))?;
    items.iter().try_fold(0_u64, |total, item| {
        let price = item.get("price").and_then(Value::as_u64).ok_or_else(|| {
            PatternError::invalid_argument("execute", "every item needs an unsigned price")
        })?;
        total
            .checked_add(price)
            .ok_or_else(|| PatternError::invalid_argument("execute", "cart total overflows"))
    })
}

/// Receipt for paying a cart through `method`.
fn pay(cart: &Value, method: &str) -> Result<Value, PatternError> {
    let total = cart_total(cart)?;
    Ok(json!({ "amount": total, "method": method, "receipt": format!("Paid ${total} via {method}") }))
}

/// Payment methods.
const PAYMENTS: &[(&str, Algorithm)] = &[
    ("credit-card", |cart| pay(cart, "Credit Card")),
    ("paypal", |cart| pay(cart, "PayPal")),
    ("bank-transfer", |cart| pay(cart, "Bank Transfer")),
];

/// Cart with two items totalling 80.
fn sample_cart() -> Value {
    json!({ "items": [{ "name": "Item 1", "price": 50 }, { "name": "Item 2", "price": 30 }] })
}

// ============================================================================
// SECTION: Sorting
// ============================================================================

/// Reads an array of integers.
fn integers(input: &Value) -> Result<Vec<i64>, PatternError> {
    input
        .as_array()
        .ok_or_else(|| PatternError::invalid_argument("execute", "input must be an array"))?
        .iter()
        .map(|value| {
            value.as_i64().ok_or_else(|| {
                PatternError::invalid_argument("execute", "array elements must be integers")
            })
        })
        .collect()
}

/// Repeatedly swaps adjacent out-of-order pairs.
fn bubble_sort(mut values: Vec<i64>) -> Vec<i64> {
    for end in (1..values.len()).rev() {
        let mut swapped = false;
        for index in 0..end {
            if values[index] > values[index + 1] {
                values.swap(index, index + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    values
}

/// Partitions around the first element and recurses.
fn quick_sort(values: Vec<i64>) -> Vec<i64> {
    let mut rest = values.into_iter();
    let Some(pivot) = rest.next() else {
        return Vec::new();
    };
    let (lower, upper): (Vec<i64>, Vec<i64>) = rest.partition(|value| *value < pivot);
    let mut sorted = quick_sort(lower);
    sorted.push(pivot);
    sorted.extend(quick_sort(upper));
    sorted
}

/// Sorts both halves and merges them.
fn merge_sort(values: Vec<i64>) -> Vec<i64> {
    if values.len() <= 1 {
        return values;
    }
    let mut left = values;
    let right = left.split_off(left.len() / 2);
    let (left, right) = (merge_sort(left), merge_sort(right));
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut lhs, mut rhs) = (left.into_iter().peekable(), right.into_iter().peekable());
    while let (Some(&a), Some(&b)) = (lhs.peek(), rhs.peek()) {
        if a <= b {
            merged.extend(lhs.next());
        } else {
            merged.extend(rhs.next());
        }
    }
    merged.extend(lhs);
    merged.extend(rhs);
    merged
}

/// Sorting algorithms.
const SORTS: &[(&str, Algorithm)] = &[
    ("bubble", |input| Ok(json!(bubble_sort(integers(input)?)))),
    ("quick", |input| Ok(json!(quick_sort(integers(input)?)))),
    ("merge", |input| Ok(json!(merge_sort(integers(input)?)))),
];

/// Unsorted sample with a duplicate.
fn sample_numbers() -> Value {
    json!([5, 2, 9, 1, 5])
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Shopping cart paying through a selectable method.
#[must_use]
pub fn payment() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::strategy(StrategyContext {
            table: PAYMENTS,
            selected: 0,
            sample: sample_cart,
        }))
    })
}

/// Sorter with a selectable algorithm.
#[must_use]
pub fn sorting() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::strategy(StrategyContext {
            table: SORTS,
            selected: 0,
            sample: sample_numbers,
        }))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::bubble_sort;
    use super::merge_sort;
    use super::quick_sort;

    #[test]
    fn every_sort_agrees_with_the_standard_library() {
        let input = vec![8, 3, 7, 2, 6, 3, -1, 0];
        let mut expected = input.clone();
        expected.sort_unstable();
        assert_eq!(bubble_sort(input.clone()), expected);
        assert_eq!(quick_sort(input.clone()), expected);
        assert_eq!(merge_sort(input), expected);
    }
}
