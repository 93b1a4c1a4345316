// crates/pattern-catalog-patterns/src/creational/object_pool.rs
// ============================================================================
// Module: Object Pool Built-ins
// Description: Bounded database-connection and image pools.
// Purpose: Reuse expensive objects with an explicit idle bound.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Both pools share [`IdlePool`], which hands out the most recently released
//! object first and drops releases once `max_size` objects are idle. The
//! pool tracks checked-out identifiers, so a second release of the same
//! object is rejected instead of queueing it twice. The
//! bound arrives through the factory configuration so one registry entry
//! can be rebuilt with a different bound without new code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use pattern_catalog_core::Factory;
use pattern_catalog_core::FactoryError;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::ObjectPoolPattern;
use pattern_catalog_core::capabilities::PooledObject;
use pattern_catalog_core::capabilities::ReleaseOutcome;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Idle Pool
// ============================================================================

/// Bookkeeping shared by the built-in pools.
#[derive(Debug, Clone)]
struct IdlePool {
    /// Maximum number of idle objects kept.
    max_size: usize,
    /// Idle objects; the last entry is handed out first.
    idle: Vec<PooledObject>,
    /// Identifiers currently checked out.
    checked_out: BTreeSet<u64>,
    /// Objects constructed so far; also the last identifier issued.
    created: u64,
}

impl IdlePool {
    /// Creates an empty pool.
    const fn new(max_size: usize) -> Self {
        Self {
            max_size,
            idle: Vec::new(),
            checked_out: BTreeSet::new(),
            created: 0,
        }
    }

    /// Checks out an idle object or constructs one. Returns the object and
    /// whether it was reused.
    fn acquire(&mut self) -> (PooledObject, bool) {
        let (object, reused) = match self.idle.pop() {
            Some(object) => (object, true),
            None => {
                self.created += 1;
                (
                    PooledObject {
                        id: self.created,
                    },
                    false,
                )
            }
        };
        self.checked_out.insert(object.id);
        (object, reused)
    }

    /// Returns an object to the idle list unless the list is full. Objects
    /// that are idle already or were never issued are rejected.
    fn release(&mut self, object: PooledObject) -> ReleaseOutcome {
        if !self.checked_out.remove(&object.id) {
            return ReleaseOutcome::Rejected;
        }
        if self.idle.len() < self.max_size {
            self.idle.push(object);
            ReleaseOutcome::Retained
        } else {
            ReleaseOutcome::Discarded
        }
    }

    /// Resolves a scripted identifier to a checked-out object.
    fn checked_out(&self, operation: &str, args: &[Value]) -> Result<PooledObject, PatternError> {
        let id = args::unsigned(operation, args, 0)?;
        if !self.checked_out.contains(&id) {
            return Err(PatternError::invalid_argument(
                operation,
                format!("object {id} is not checked out"),
            ));
        }
        Ok(PooledObject {
            id,
        })
    }
}

/// Scripted label for a release outcome.
const fn outcome_label(outcome: ReleaseOutcome) -> &'static str {
    match outcome {
        ReleaseOutcome::Retained => "retained",
        ReleaseOutcome::Discarded => "discarded",
        ReleaseOutcome::Rejected => "rejected",
    }
}

// ============================================================================
// SECTION: Connection Pool
// ============================================================================

/// Pool of simulated database connections.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    /// Pool bookkeeping.
    pool: IdlePool,
}

impl Scriptable for ConnectionPool {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "acquire" => {
                let (object, reused) = self.pool.acquire();
                Ok(json!({ "id": object.id, "reused": reused }))
            }
            "query" => {
                let object = self.pool.checked_out(operation, args)?;
                let sql = args::string(operation, args, 1)?;
                Ok(json!(format!("Connection {} executing query: {sql}", object.id)))
            }
            "release" => {
                let object = self.pool.checked_out(operation, args)?;
                Ok(json!(outcome_label(self.release(object))))
            }
            "available" => Ok(json!(self.available())),
            "created" => Ok(json!(self.created())),
            "max_size" => Ok(json!(self.max_size())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl ObjectPoolPattern for ConnectionPool {
    fn max_size(&self) -> usize {
        self.pool.max_size
    }

    fn acquire(&mut self) -> PooledObject {
        self.pool.acquire().0
    }

    fn release(&mut self, object: PooledObject) -> ReleaseOutcome {
        self.pool.release(object)
    }

    fn available(&self) -> usize {
        self.pool.idle.len()
    }

    fn created(&self) -> u64 {
        self.pool.created
    }
}

// ============================================================================
// SECTION: Image Pool
// ============================================================================

/// Pool of image objects that are re-pointed at a new source on reuse.
#[derive(Debug, Clone)]
pub struct ImagePool {
    /// Pool bookkeeping.
    pool: IdlePool,
    /// Current source of every live image.
    sources: BTreeMap<u64, String>,
}

impl Scriptable for ImagePool {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "get_image" => {
                let src = args::string(operation, args, 0)?;
                let (object, reused) = self.pool.acquire();
                self.sources.insert(object.id, src.to_string());
                Ok(json!({ "id": object.id, "src": src, "reused": reused }))
            }
            "release_image" => {
                let object = self.pool.checked_out(operation, args)?;
                Ok(json!(outcome_label(self.release(object))))
            }
            "display" => {
                let object = self.pool.checked_out(operation, args)?;
                let src = self.sources.get(&object.id).map_or("", String::as_str);
                Ok(json!(format!("Displaying image: {src}")))
            }
            "available" => Ok(json!(self.available())),
            "created" => Ok(json!(self.created())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl ObjectPoolPattern for ImagePool {
    fn max_size(&self) -> usize {
        self.pool.max_size
    }

    fn acquire(&mut self) -> PooledObject {
        self.pool.acquire().0
    }

    fn release(&mut self, object: PooledObject) -> ReleaseOutcome {
        let outcome = self.pool.release(object);
        if outcome == ReleaseOutcome::Discarded {
            self.sources.remove(&object.id);
        }
        outcome
    }

    fn available(&self) -> usize {
        self.pool.idle.len()
    }

    fn created(&self) -> u64 {
        self.pool.created
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Reads the idle bound from a pool factory configuration.
fn configured_max_size(config: &Value) -> Result<usize, FactoryError> {
    let max = config
        .get("max_size")
        .and_then(Value::as_u64)
        .ok_or_else(|| FactoryError::new("pool configuration requires an unsigned max_size"))?;
    let max = usize::try_from(max)
        .map_err(|_| FactoryError::new(format!("pool max_size {max} does not fit in memory")))?;
    if max == 0 {
        return Err(FactoryError::new("pool max_size must be at least 1"));
    }
    Ok(max)
}

/// Connection pool retaining at most `max_size` idle connections.
#[must_use]
pub fn database_connections(max_size: usize) -> Factory {
    Factory::with_config(json!({ "max_size": max_size }), |config| {
        Ok(PatternInstance::object_pool(ConnectionPool {
            pool: IdlePool::new(configured_max_size(config)?),
        }))
    })
}

/// Image pool retaining at most `max_size` idle images.
#[must_use]
pub fn image_pool(max_size: usize) -> Factory {
    Factory::with_config(json!({ "max_size": max_size }), |config| {
        Ok(PatternInstance::object_pool(ImagePool {
            pool: IdlePool::new(configured_max_size(config)?),
            sources: BTreeMap::new(),
        }))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
