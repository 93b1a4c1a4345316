// crates/pattern-catalog-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards and value limits.
// Purpose: Ensure config input handling is strict and fail-closed.
// ============================================================================
//! Config load validation tests for pattern-catalog-config.

#![allow(clippy::use_debug, reason = "Test failure messages print debug values.")]

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use pattern_catalog_config::CatalogConfig;
use pattern_catalog_config::ConfigError;
use pattern_catalog_config::OutputFormat;
use tempfile::NamedTempFile;

/// Result type for config tests.
type TestResult = Result<(), String>;

/// Fails unless `result` is an error mentioning `needle`.
fn assert_invalid(result: Result<CatalogConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

/// Writes `content` to a temporary config file.
fn write_config(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config(b"")?;
    let config = CatalogConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != CatalogConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    if config.pool.max_size != 4 || config.runner.max_script_steps != 256 {
        return Err("unexpected default limits".to_string());
    }
    Ok(())
}

#[test]
fn full_file_is_parsed() -> TestResult {
    let file = write_config(
        br#"
[pool]
max_size = 8

[runner]
max_script_steps = 32
max_script_bytes = 4096

[audit]
enabled = true
path = "audit.jsonl"

[output]
format = "markdown"
"#,
    )?;
    let config = CatalogConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.pool.max_size != 8 || config.runner.max_script_steps != 32 || config.runner.max_script_bytes != 4096 {
        return Err("limits not parsed".to_string());
    }
    if !config.audit.enabled || config.audit.path != Some(PathBuf::from("audit.jsonl")) {
        return Err("audit section not parsed".to_string());
    }
    if config.output.format != OutputFormat::Markdown {
        return Err("output format not parsed".to_string());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    assert_invalid(CatalogConfig::from_toml("[pool]\nmax_size = 4\nmin_size = 1\n"), "config parse error")?;
    assert_invalid(CatalogConfig::from_toml("[cache]\nenabled = true\n"), "config parse error")
}

#[test]
fn zero_pool_size_is_rejected() -> TestResult {
    assert_invalid(CatalogConfig::from_toml("[pool]\nmax_size = 0\n"), "pool.max_size")
}

#[test]
fn oversized_pool_is_rejected() -> TestResult {
    assert_invalid(CatalogConfig::from_toml("[pool]\nmax_size = 1025\n"), "pool.max_size")
}

#[test]
fn zero_step_limit_is_rejected() -> TestResult {
    assert_invalid(CatalogConfig::from_toml("[runner]\nmax_script_steps = 0\n"), "runner.max_script_steps")
}

#[test]
fn unknown_output_format_is_rejected() -> TestResult {
    assert_invalid(CatalogConfig::from_toml("[output]\nformat = \"yaml\"\n"), "config parse error")
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(CatalogConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = write_config(&vec![b'#'; 1_048_577])?;
    assert_invalid(CatalogConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = write_config(&[0xFF, 0xFE, 0xFF])?;
    assert_invalid(CatalogConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let missing = dir.path().join("absent.toml");
    match CatalogConfig::load(Some(&missing)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}
