// crates/pattern-catalog-patterns/src/structural/adapter.rs
// ============================================================================
// Module: Adapter Built-ins
// Description: API response adapters and chart data adapters.
// Purpose: Present incompatible sources through one target shape.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Each [`Source`] pairs a raw payload in its native shape with the function
//! that translates it. Clients only ever see the adapted shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::AdapterPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Adaptee with its translation into the target shape.
#[derive(Clone, Copy)]
struct Source {
    /// Source name.
    name: &'static str,
    /// Native payload.
    raw: fn() -> Value,
    /// Translates the native payload.
    adapt: fn(&str, Value) -> Value,
}

/// Adapter over a fixed set of sources.
pub struct SourceAdapter {
    /// Keys of the target shape.
    target: &'static [&'static str],
    /// Adapted sources.
    sources: &'static [Source],
}

impl SourceAdapter {
    /// Looks up a source by name.
    fn source(&self, name: &str) -> Result<&Source, PatternError> {
        self.sources
            .iter()
            .find(|source| source.name == name)
            .ok_or_else(|| PatternError::rejected(format!("unknown source: {name}")))
    }
}

impl Scriptable for SourceAdapter {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "sources" => Ok(json!(self.sources())),
            "target" => Ok(json!(self.target_keys())),
            "fetch" => self.fetch(args::string(operation, args, 0)?),
            "raw" => Ok((self.source(args::string(operation, args, 0)?)?.raw)()),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl AdapterPattern for SourceAdapter {
    fn target_keys(&self) -> Vec<String> {
        crate::owned(self.target)
    }

    fn sources(&self) -> Vec<String> {
        self.sources.iter().map(|source| source.name.to_string()).collect()
    }

    fn fetch(&self, source: &str) -> Result<Value, PatternError> {
        let source = self.source(source)?;
        Ok((source.adapt)(source.name, (source.raw)()))
    }
}

// ============================================================================
// SECTION: Data Fetching
// ============================================================================

/// Shape returned by the data fetching adapter.
const RESPONSE_KEYS: &[&str] = &["result", "source"];

/// Legacy API responding with `{ "result": ... }`.
fn legacy_response() -> Value {
    json!({ "result": "Data from legacy API" })
}

/// Modern API responding with `{ "data": ..., "status": ... }`.
fn modern_response() -> Value {
    json!({ "data": "Data from modern API", "status": 200 })
}

/// Passes the legacy payload through.
fn adapt_legacy(name: &str, raw: Value) -> Value {
    json!({ "result": raw.get("result").cloned().unwrap_or(Value::Null), "source": name })
}

/// Renames the modern `data` field.
fn adapt_modern(name: &str, raw: Value) -> Value {
    json!({ "result": raw.get("data").cloned().unwrap_or(Value::Null), "source": name })
}

/// API sources.
const APIS: &[Source] = &[
    Source {
        name: "legacy-api",
        raw: legacy_response,
        adapt: adapt_legacy,
    },
    Source {
        name: "modern-api",
        raw: modern_response,
        adapt: adapt_modern,
    },
];

// ============================================================================
// SECTION: Charting
// ============================================================================

/// Shape expected by the charting library.
const SERIES_KEYS: &[&str] = &["label", "points"];

/// Plain array of values.
fn array_series() -> Value {
    json!([10, 20, 30])
}

/// Monthly records.
fn monthly_records() -> Value {
    json!([
        { "month": "Jan", "total": 12 },
        { "month": "Feb", "total": 18 },
        { "month": "Mar", "total": 9 },
    ])
}

/// Points indexed by position.
fn adapt_array(name: &str, raw: Value) -> Value {
    let points: Vec<Value> = raw
        .as_array()
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(x, y)| json!({ "x": x, "y": y }))
        .collect();
    json!({ "label": name, "points": points })
}

/// Points keyed by month.
fn adapt_records(name: &str, raw: Value) -> Value {
    let points: Vec<Value> = raw
        .as_array()
        .into_iter()
        .flatten()
        .map(|record| json!({ "x": record.get("month"), "y": record.get("total") }))
        .collect();
    json!({ "label": name, "points": points })
}

/// Chart data sources.
const SERIES: &[Source] = &[
    Source {
        name: "array",
        raw: array_series,
        adapt: adapt_array,
    },
    Source {
        name: "monthly-records",
        raw: monthly_records,
        adapt: adapt_records,
    },
];

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Legacy and modern APIs adapted to one response shape.
#[must_use]
pub fn data_fetching() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::adapter(SourceAdapter {
            target: RESPONSE_KEYS,
            sources: APIS,
        }))
    })
}

/// Chart inputs adapted to `{ x, y }` point series.
#[must_use]
pub fn charting() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::adapter(SourceAdapter {
            target: SERIES_KEYS,
            sources: SERIES,
        }))
    })
}
