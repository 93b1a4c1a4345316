// crates/pattern-catalog-patterns/src/creational/singleton.rs
// ============================================================================
// Module: Singleton Built-ins
// Description: Shared logger and shared database connection.
// Purpose: Demonstrate one instance per registry entry without globals.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Each factory owns one `Arc<Mutex<_>>` and hands every construction a
//! handle to it. The instance key is the address of that shared allocation,
//! so handles from one factory always agree and handles from two factories
//! never do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::InstanceKey;
use pattern_catalog_core::capabilities::SingletonPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Shared Handle
// ============================================================================

/// Handle to state shared by every construction of one entry.
#[derive(Debug)]
struct Shared<T> {
    /// Shared state.
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    /// Wraps fresh state.
    fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Another handle to the same state.
    fn handle(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Identity of the shared allocation.
    fn key(&self) -> InstanceKey {
        InstanceKey(Arc::as_ptr(&self.inner).addr())
    }

    /// Locks the shared state, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes the last occurrence of `entry` from `records`.
fn retract_last(records: &mut Vec<String>, entry: &str) -> bool {
    match records.iter().rposition(|record| record == entry) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

// ============================================================================
// SECTION: Logger
// ============================================================================

/// Application logger: every handle appends to the same log.
#[derive(Debug)]
pub struct Logger {
    /// Shared log lines.
    logs: Shared<Vec<String>>,
}

impl Scriptable for Logger {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "log" => {
                let message = args::string(operation, args, 0)?;
                self.record(message);
                Ok(json!(format!("Log: {message}")))
            }
            "logs" => Ok(json!(self.records())),
            "instance" => Ok(json!(self.instance_key().to_string())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl SingletonPattern for Logger {
    fn instance_key(&self) -> InstanceKey {
        self.logs.key()
    }

    fn record(&mut self, entry: &str) {
        self.logs.lock().push(entry.to_string());
    }

    fn records(&self) -> Vec<String> {
        self.logs.lock().clone()
    }

    fn retract(&mut self, entry: &str) -> bool {
        retract_last(&mut self.logs.lock(), entry)
    }
}

/// Factory handing out handles to one logger.
#[must_use]
pub fn logger() -> Factory {
    let logs = Shared::new(Vec::new());
    Factory::new(move || {
        Ok(PatternInstance::singleton(Logger {
            logs: logs.handle(),
        }))
    })
}

// ============================================================================
// SECTION: Database Connection
// ============================================================================

/// Simulated connection state.
#[derive(Debug)]
struct Connection {
    /// Database the connection is bound to.
    database: String,
    /// Queries executed, oldest first.
    queries: Vec<String>,
}

/// Database connection opened once and reused by every handle.
#[derive(Debug)]
pub struct DatabaseConnection {
    /// Shared connection.
    connection: Shared<Connection>,
}

impl Scriptable for DatabaseConnection {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "query" => {
                let sql = args::string(operation, args, 0)?;
                self.record(sql);
                Ok(json!(format!("Executing query: {sql}")))
            }
            "queries" => Ok(json!(self.records())),
            "database" => Ok(json!(self.connection.lock().database)),
            "instance" => Ok(json!(self.instance_key().to_string())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl SingletonPattern for DatabaseConnection {
    fn instance_key(&self) -> InstanceKey {
        self.connection.key()
    }

    fn record(&mut self, entry: &str) {
        self.connection.lock().queries.push(entry.to_string());
    }

    fn records(&self) -> Vec<String> {
        self.connection.lock().queries.clone()
    }

    fn retract(&mut self, entry: &str) -> bool {
        retract_last(&mut self.connection.lock().queries, entry)
    }
}

/// Factory handing out handles to one connection bound to `database`.
#[must_use]
pub fn database_connection(database: &str) -> Factory {
    let connection = Shared::new(Connection {
        database: database.to_string(),
        queries: Vec::new(),
    });
    Factory::new(move || {
        Ok(PatternInstance::singleton(DatabaseConnection {
            connection: connection.handle(),
        }))
    })
}
