// crates/pattern-catalog-core/src/runner.rs
// ============================================================================
// Module: Example Runner
// Description: Scripted execution of registered pattern implementations.
// Purpose: Turn usage demonstrations into data: outputs in, outputs out.
// Dependencies: crate::{audit, category, error, instance, registry}, serde
// ============================================================================

//! ## Overview
//! A [`Script`] is an ordered list of named operations. The runner constructs
//! one fresh instance of the requested entry and applies every step to it in
//! order, collecting one output per step. A failing step stops the run; the
//! outputs produced before it are returned inside [`ScriptFailure`].
//!
//! ## Security posture
//! Scripts are untrusted input: they are bounded by [`RunnerLimits`] before
//! any step runs, and a panicking operation is reported as a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::ScriptAuditEvent;
use crate::category::PatternCategory;
use crate::error::FactoryError;
use crate::error::PatternError;
use crate::error::RegistryError;
use crate::factory::Factory;
use crate::factory::FactoryResult;
use crate::instance::Scriptable;
use crate::registry::Registry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum number of steps per script.
pub const DEFAULT_MAX_SCRIPT_STEPS: usize = 256;

// ============================================================================
// SECTION: Scripts
// ============================================================================

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Operation name understood by the instance.
    pub operation: String,
    /// Positional operation arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Ordered operations applied to one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, operation: impl Into<String>, args: Vec<Value>) -> Self {
        self.steps.push(ScriptStep {
            operation: operation.into(),
            args,
        });
        self
    }

    /// Parses a script from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the bytes are not a valid script.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true when the script has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reason a script run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The requested entry is not registered.
    #[error(transparent)]
    Lookup(#[from] RegistryError),
    /// The entry's factory failed.
    #[error(transparent)]
    Construction(#[from] FactoryError),
    /// The script exceeds the configured step limit.
    #[error("script has {steps} steps, limit is {max}")]
    ScriptTooLong {
        /// Steps in the submitted script.
        steps: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The instance does not support a step's operation.
    #[error("step {step}: unknown operation {operation}")]
    UnknownOperation {
        /// Zero-based index of the failing step.
        step: usize,
        /// Operation name that was requested.
        operation: String,
    },
    /// A step's operation returned an error.
    #[error("step {step}: {source}")]
    OperationFailed {
        /// Zero-based index of the failing step.
        step: usize,
        /// Error raised by the instance.
        source: PatternError,
    },
    /// A step's operation panicked.
    #[error("step {step}: operation {operation} panicked: {message}")]
    OperationPanicked {
        /// Zero-based index of the failing step.
        step: usize,
        /// Operation name that panicked.
        operation: String,
        /// Panic payload message.
        message: String,
    },
}

/// Failed run with the outputs produced before the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ScriptFailure {
    /// Outputs of the steps that completed, in order.
    pub outputs: Vec<Value>,
    /// Reason the run stopped.
    pub error: RunError,
}

impl ScriptFailure {
    /// Failure with no outputs.
    #[must_use]
    pub const fn without_outputs(error: RunError) -> Self {
        Self {
            outputs: Vec::new(),
            error,
        }
    }
}

// ============================================================================
// SECTION: Step Execution
// ============================================================================

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Constructs an instance, converting a panicking factory into an error.
pub(crate) fn construct_guarded(factory: &Factory) -> FactoryResult {
    catch_unwind(AssertUnwindSafe(|| factory.construct())).unwrap_or_else(|payload| {
        Err(FactoryError::new(format!("factory panicked: {}", panic_message(payload.as_ref()))))
    })
}

/// Applies every step of `script` to `target` in order.
///
/// # Errors
///
/// Returns [`ScriptFailure`] at the first failing step, carrying the outputs
/// of the steps before it.
pub fn execute_steps(
    target: &mut dyn Scriptable,
    script: &Script,
) -> Result<Vec<Value>, ScriptFailure> {
    let mut outputs = Vec::with_capacity(script.steps.len());
    for (step, entry) in script.steps.iter().enumerate() {
        let result = catch_unwind(AssertUnwindSafe(|| target.invoke(&entry.operation, &entry.args)));
        let error = match result {
            Ok(Ok(output)) => {
                outputs.push(output);
                continue;
            }
            Ok(Err(PatternError::UnknownOperation {
                operation,
            })) => RunError::UnknownOperation {
                step,
                operation,
            },
            Ok(Err(source)) => RunError::OperationFailed {
                step,
                source,
            },
            Err(payload) => RunError::OperationPanicked {
                step,
                operation: entry.operation.clone(),
                message: panic_message(payload.as_ref()),
            },
        };
        return Err(ScriptFailure {
            outputs,
            error,
        });
    }
    Ok(outputs)
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Execution limits applied before a script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerLimits {
    /// Maximum number of steps per script.
    pub max_steps: usize,
}

impl Default for RunnerLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_SCRIPT_STEPS,
        }
    }
}

/// Runs scripts against registered entries.
pub struct ExampleRunner<'a> {
    /// Registry the runner reads from.
    registry: &'a Registry,
    /// Execution limits.
    limits: RunnerLimits,
    /// Audit destination.
    audit: &'a dyn AuditSink,
}

impl<'a> ExampleRunner<'a> {
    /// Creates a runner with default limits and no audit output.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            limits: RunnerLimits::default(),
            audit: &NoopAuditSink,
        }
    }

    /// Replaces the execution limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: RunnerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: &'a dyn AuditSink) -> Self {
        self.audit = audit;
        self
    }

    /// Runs `script` against a fresh instance of `(category, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptFailure`] for lookup, construction, limit, or step
    /// failures. Step failures carry the partial outputs.
    pub fn run(
        &self,
        category: PatternCategory,
        name: &str,
        script: &Script,
    ) -> Result<Vec<Value>, ScriptFailure> {
        let entry = self
            .registry
            .get(category, name)
            .map_err(|error| ScriptFailure::without_outputs(error.into()))?;
        let result = self.run_entry(entry.factory(), script);
        let (completed, error) = match &result {
            Ok(outputs) => (outputs.len(), None),
            Err(failure) => (failure.outputs.len(), Some(failure.error.to_string())),
        };
        self.audit.record_script(&ScriptAuditEvent::new(
            category,
            entry.name(),
            script.len(),
            completed,
            error,
        ));
        result
    }

    /// Enforces limits, constructs, then executes.
    fn run_entry(
        &self,
        factory: &Factory,
        script: &Script,
    ) -> Result<Vec<Value>, ScriptFailure> {
        if script.len() > self.limits.max_steps {
            return Err(ScriptFailure::without_outputs(RunError::ScriptTooLong {
                steps: script.len(),
                max: self.limits.max_steps,
            }));
        }
        let mut instance = construct_guarded(factory)
            .map_err(|error| ScriptFailure::without_outputs(error.into()))?;
        execute_steps(instance.scriptable_mut(), script)
    }
}
