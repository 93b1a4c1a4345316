// crates/pattern-catalog-core/src/audit.rs
// ============================================================================
// Module: Catalog Audit Logging
// Description: Structured audit events for verification and script runs.
// Purpose: Emit JSON-line records without tying the core to a log pipeline.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The verifier and the example runner report what they did through an
//! [`AuditSink`]. Events are plain serializable records; sinks decide where
//! the JSON lines go. The no-op sink is the default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::category::PatternCategory;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Emitted once per verified entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Entry category.
    pub category: PatternCategory,
    /// Entry name.
    pub entry: String,
    /// Report rows, including the construction row.
    pub checks: usize,
    /// Failed report rows.
    pub failed: usize,
    /// True when every row passed.
    pub passed: bool,
}

impl VerificationAuditEvent {
    /// Creates a verification event with the current timestamp.
    #[must_use]
    pub fn new(category: PatternCategory, entry: &str, checks: usize, failed: usize) -> Self {
        Self {
            event: "pattern_verification",
            timestamp_ms: now_ms(),
            category,
            entry: entry.to_string(),
            checks,
            failed,
            passed: failed == 0,
        }
    }
}

/// Outcome label of a script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOutcome {
    /// Every step completed.
    Completed,
    /// A step failed; outputs are partial.
    Failed,
}

/// Emitted once per example-runner invocation that resolved an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Entry category.
    pub category: PatternCategory,
    /// Entry name.
    pub entry: String,
    /// Steps in the submitted script.
    pub steps: usize,
    /// Steps that produced an output.
    pub completed: usize,
    /// Run outcome.
    pub outcome: ScriptOutcome,
    /// Error message when the run failed.
    pub error: Option<String>,
}

impl ScriptAuditEvent {
    /// Creates a script event with the current timestamp.
    #[must_use]
    pub fn new(
        category: PatternCategory,
        entry: &str,
        steps: usize,
        completed: usize,
        error: Option<String>,
    ) -> Self {
        let outcome =
            if error.is_some() { ScriptOutcome::Failed } else { ScriptOutcome::Completed };
        Self {
            event: "pattern_script",
            timestamp_ms: now_ms(),
            category,
            entry: entry.to_string(),
            steps,
            completed,
            outcome,
            error,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for catalog audit events.
pub trait AuditSink: Send + Sync {
    /// Records a verification event.
    fn record_verification(&self, event: &VerificationAuditEvent);

    /// Records a script event.
    fn record_script(&self, _event: &ScriptAuditEvent) {}
}

/// Writes one JSON line for `event`, ignoring I/O failures.
fn write_json_line<W: Write, T: Serialize>(mut writer: W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
        let _ = writer.flush();
    }
}

/// Audit sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_verification(&self, _event: &VerificationAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_verification(&self, event: &VerificationAuditEvent) {
        write_json_line(io::stderr().lock(), event);
    }

    fn record_script(&self, event: &ScriptAuditEvent) {
        write_json_line(io::stderr().lock(), event);
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record_verification(&self, event: &VerificationAuditEvent) {
        if let Ok(mut file) = self.file.lock() {
            write_json_line(&mut *file, event);
        }
    }

    fn record_script(&self, event: &ScriptAuditEvent) {
        if let Ok(mut file) = self.file.lock() {
            write_json_line(&mut *file, event);
        }
    }
}

/// Audit sink that keeps events in memory, for hosts that inspect them.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    /// Verification events in record order.
    verifications: Mutex<Vec<VerificationAuditEvent>>,
    /// Script events in record order.
    scripts: Mutex<Vec<ScriptAuditEvent>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded verification events.
    #[must_use]
    pub fn verifications(&self) -> Vec<VerificationAuditEvent> {
        self.verifications.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Recorded script events.
    #[must_use]
    pub fn scripts(&self) -> Vec<ScriptAuditEvent> {
        self.scripts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record_verification(&self, event: &VerificationAuditEvent) {
        self.verifications.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }

    fn record_script(&self, event: &ScriptAuditEvent) {
        self.scripts.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}
