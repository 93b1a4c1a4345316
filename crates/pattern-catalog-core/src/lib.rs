// crates/pattern-catalog-core/src/lib.rs
// ============================================================================
// Module: Pattern Catalog Core Library
// Description: Public API surface for the pattern registry and verifier.
// Purpose: Expose registry, contract, verifier, and runner types.
// Dependencies: crate::{audit, capabilities, category, contract, contracts,
//               error, factory, instance, registry, runner, verifier}
// ============================================================================

//! ## Overview
//! Pattern Catalog core stores named design-pattern implementations, defines
//! each category's behavioral contract as executable checks, verifies
//! implementations against those contracts, and drives implementations through
//! scripted examples. Verification is total: one broken implementation never
//! hides the results of another.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod capabilities;
pub mod category;
pub mod contract;
pub mod contracts;
pub mod error;
pub mod factory;
pub mod instance;
pub mod registry;
pub mod runner;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::InMemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ScriptAuditEvent;
pub use audit::StderrAuditSink;
pub use audit::VerificationAuditEvent;
pub use category::CategoryParseError;
pub use category::PatternCategory;
pub use contract::Check;
pub use contract::CheckContext;
pub use contract::CheckFailure;
pub use contract::CheckOutcome;
pub use contract::Contract;
pub use contract::require;
pub use contracts::ContractBook;
pub use error::FactoryError;
pub use error::PatternError;
pub use error::RegistryError;
pub use factory::Factory;
pub use factory::FactoryResult;
pub use instance::PatternInstance;
pub use instance::Scriptable;
pub use registry::MAX_ENTRY_NAME_LENGTH;
pub use registry::PatternEntry;
pub use registry::Registry;
pub use registry::SharedRegistry;
pub use runner::ExampleRunner;
pub use runner::RunError;
pub use runner::RunnerLimits;
pub use runner::Script;
pub use runner::ScriptFailure;
pub use runner::ScriptStep;
pub use runner::execute_steps;
pub use verifier::CONSTRUCTION_CHECK;
pub use verifier::CheckResult;
pub use verifier::VerificationReport;
pub use verifier::Verifier;
pub use verifier::verify_entry;
