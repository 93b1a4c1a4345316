// crates/pattern-catalog-config/src/config.rs
// ============================================================================
// Module: Catalog Configuration
// Description: Configuration model, loading, and validation.
// Purpose: Parse pattern-catalog.toml with strict, fail-closed limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`CatalogConfig`] mirrors `pattern-catalog.toml`. Every section rejects
//! unknown keys, and every loaded file goes through [`CatalogConfig::validate`]
//! before it is handed to callers.
//!
//! Resolution order for the file path: explicit path, then the
//! `PATTERN_CATALOG_CONFIG` environment variable, then `pattern-catalog.toml`
//! in the working directory when it exists. With none of these, defaults apply.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "PATTERN_CATALOG_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pattern-catalog.toml";
/// Largest accepted config file.
pub const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;
/// Longest accepted config path.
pub const MAX_CONFIG_PATH_LENGTH: usize = 4096;
/// Longest accepted path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Largest pool bound.
pub const MAX_POOL_SIZE: usize = 1024;
/// Largest script step limit.
pub const MAX_SCRIPT_STEPS: usize = 65_536;
/// Largest script file limit.
pub const MAX_SCRIPT_BYTES: u64 = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to load or validate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The config file is not valid TOML for the model.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The config parsed but violates a limit.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Output format for verification reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON report array.
    Json,
    /// Markdown table.
    Markdown,
}

/// `[pool]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PoolConfig {
    /// Idle bound for built-in object pools.
    pub max_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
        }
    }
}

/// `[runner]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RunnerConfig {
    /// Maximum steps per script.
    pub max_script_steps: usize,
    /// Maximum script file size in bytes.
    pub max_script_bytes: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_script_steps: 256,
            max_script_bytes: 1024 * 1024,
        }
    }
}

/// `[audit]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuditConfig {
    /// Emits audit events when true.
    pub enabled: bool,
    /// JSON-lines file; stderr when absent.
    pub path: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Default report format.
    pub format: OutputFormat,
}

/// Parsed `pattern-catalog.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CatalogConfig {
    /// Object pool settings.
    pub pool: PoolConfig,
    /// Example runner limits.
    pub runner: RunnerConfig,
    /// Audit output.
    pub audit: AuditConfig,
    /// Report output.
    pub output: OutputConfig,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl CatalogConfig {
    /// Loads configuration from `path`, the environment, or the working
    /// directory, falling back to defaults when no file is found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(path) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates one config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        check_path(path)?;
        let metadata = fs::metadata(path).map_err(|error| ConfigError::Io(error.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let bytes = fs::read(path).map_err(|error| ConfigError::Io(error.to_string()))?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against its limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_POOL_SIZE).contains(&self.pool.max_size) {
            return Err(ConfigError::Invalid(format!(
                "pool.max_size must be between 1 and {MAX_POOL_SIZE}"
            )));
        }
        if !(1..=MAX_SCRIPT_STEPS).contains(&self.runner.max_script_steps) {
            return Err(ConfigError::Invalid(format!(
                "runner.max_script_steps must be between 1 and {MAX_SCRIPT_STEPS}"
            )));
        }
        if !(1..=MAX_SCRIPT_BYTES).contains(&self.runner.max_script_bytes) {
            return Err(ConfigError::Invalid(format!(
                "runner.max_script_bytes must be between 1 and {MAX_SCRIPT_BYTES}"
            )));
        }
        if let Some(path) = &self.audit.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("audit.path must not be empty".to_string()));
            }
            check_path(path)?;
        }
        Ok(())
    }
}

/// Picks the config file to load, if any.
fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.is_file().then_some(fallback)
}

/// Rejects overlong paths before touching the filesystem.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_CONFIG_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    if path.components().any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH) {
        return Err(ConfigError::Invalid("config path component too long".to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
