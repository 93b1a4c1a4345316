// crates/pattern-catalog-config/src/lib.rs
// ============================================================================
// Module: Pattern Catalog Config
// Description: Canonical configuration model for pattern-catalog.toml.
// Purpose: Expose loading and validation to the CLI and embedding hosts.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the pattern catalog: pool bounds for built-ins, runner
//! limits, audit output, and the default report format.

pub mod config;

pub use config::AuditConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::CatalogConfig;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_FILE;
pub use config::OutputConfig;
pub use config::OutputFormat;
pub use config::PoolConfig;
pub use config::RunnerConfig;
