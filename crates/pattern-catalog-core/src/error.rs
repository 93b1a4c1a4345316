// crates/pattern-catalog-core/src/error.rs
// ============================================================================
// Module: Catalog Error Definitions
// Description: Error taxonomy for registry lookups, factories, and instances.
// Purpose: Give callers typed, matchable failures with precise diagnostics.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Registry errors are surfaced to callers and never defaulted. Pattern
//! errors are raised by live instances (for example an exhausted iterator)
//! and are either converted into failed checks by the verifier or surfaced
//! with partial results by the example runner.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::category::PatternCategory;

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Registry mutation and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An entry with the same name already exists in the category.
    #[error("duplicate entry {category}/{name}")]
    DuplicateName {
        /// Category of the colliding entry.
        category: PatternCategory,
        /// Colliding entry name.
        name: String,
    },
    /// No entry with the given name exists in the category.
    #[error("entry {category}/{name} not found")]
    NotFound {
        /// Category that was searched.
        category: PatternCategory,
        /// Name that was not found.
        name: String,
    },
    /// The supplied contract verifies a different category.
    #[error("contract for {contract} cannot verify {category} entry {name}")]
    ContractMismatch {
        /// Category of the entry being registered.
        category: PatternCategory,
        /// Category declared by the contract.
        contract: PatternCategory,
        /// Entry name.
        name: String,
    },
    /// Entry name is empty or exceeds the maximum length.
    #[error("invalid entry name: {0}")]
    InvalidName(String),
}

// ============================================================================
// SECTION: Instance Errors
// ============================================================================

/// Failures raised by live pattern instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// `next` was called after every element had been produced.
    #[error("iterator exhausted")]
    ExhaustedIterator,
    /// The instance does not support the named operation.
    #[error("unknown operation: {operation}")]
    UnknownOperation {
        /// Operation name that was requested.
        operation: String,
    },
    /// An operation argument is missing or has the wrong shape.
    #[error("invalid argument for {operation}: {message}")]
    InvalidArgument {
        /// Operation that received the argument.
        operation: String,
        /// Description of the problem.
        message: String,
    },
    /// The instance refused the request (unknown kind, member, sender, ...).
    #[error("rejected: {0}")]
    Rejected(String),
}

impl PatternError {
    /// Creates an unknown-operation error.
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

// ============================================================================
// SECTION: Factory Errors
// ============================================================================

/// Failure to construct a pattern instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("construction failed: {message}")]
pub struct FactoryError {
    /// Human-readable failure message.
    pub message: String,
}

impl FactoryError {
    /// Creates a factory error with the provided message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
