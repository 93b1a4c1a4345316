// crates/pattern-catalog-cli/tests/commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Runs the pattern-catalog binary end to end.
// Purpose: Pin exit codes and output for each subcommand.
// Dependencies: pattern-catalog-cli binary, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Each test runs the compiled binary in an empty temporary directory so no
//! stray `pattern-catalog.toml` or environment override leaks in.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs the binary with `args` inside `dir`.
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pattern-catalog"))
        .args(args)
        .current_dir(dir)
        .env_remove("PATTERN_CATALOG_CONFIG")
        .env_remove("PATTERN_CATALOG_LANG")
        .output()
        .expect("binary runs")
}

/// Runs the binary in a fresh empty directory.
fn run(args: &[&str]) -> Output {
    let dir = TempDir::new().expect("temp dir");
    run_in(dir.path(), args)
}

/// Stdout as text.
fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn categories_lists_all_twenty() {
    let output = run(&["categories"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 20, "one line per category: {text}");
    assert!(text.lines().any(|line| line.starts_with("singleton\t")), "singleton row missing: {text}");
}

#[test]
fn list_prints_entry_names() {
    let output = run(&["list", "iterator"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.lines().any(|line| line == "three-items"), "three-items missing: {text}");
}

#[test]
fn unknown_category_exits_with_two() {
    let output = run(&["list", "monad"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("monad"), "error should name the label");
}

#[test]
fn verifying_builtins_exits_with_zero() {
    let output = run(&["verify", "object-pool", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let reports: Value = serde_json::from_slice(&output.stdout).expect("json report");
    let reports = reports.as_array().expect("report array");
    assert_eq!(reports.len(), 2, "both pools reported");
}

#[test]
fn verifying_a_missing_entry_exits_with_two() {
    let output = run(&["verify", "singleton", "nope"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn markdown_report_is_a_table() {
    let output = run(&["verify", "facade", "home-theater", "--format", "markdown"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("| Category |"), "markdown header missing: {text}");
    assert!(text.contains("| facade | home-theater | construction | pass |"), "construction row missing: {text}");
}

#[test]
fn run_prints_outputs_as_json() {
    let dir = TempDir::new().expect("temp dir");
    let script = dir.path().join("script.json");
    fs::write(&script, r#"{"steps":[{"operation":"next"},{"operation":"next"}]}"#).expect("write script");
    let output = run_in(dir.path(), &["run", "iterator", "three-items", "script.json"]);
    assert_eq!(output.status.code(), Some(0));
    let outputs: Value = serde_json::from_slice(&output.stdout).expect("json outputs");
    assert_eq!(outputs, json!([1, 2]));
}

#[test]
fn failing_script_prints_partials_and_exits_with_one() {
    let dir = TempDir::new().expect("temp dir");
    let steps: Vec<Value> = (0..4).map(|_| json!({ "operation": "next" })).collect();
    fs::write(dir.path().join("script.json"), json!({ "steps": steps }).to_string()).expect("write script");
    let output = run_in(dir.path(), &["run", "iterator", "three-items", "script.json"]);
    assert_eq!(output.status.code(), Some(1));
    let outputs: Value = serde_json::from_slice(&output.stdout).expect("json outputs");
    assert_eq!(outputs, json!([1, 2, 3]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("step 3"), "error should name the step");
}

#[test]
fn script_over_the_step_limit_is_refused() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("pattern-catalog.toml"), "[runner]\nmax_script_steps = 1\n").expect("write config");
    fs::write(dir.path().join("script.json"), r#"{"steps":[{"operation":"next"},{"operation":"next"}]}"#)
        .expect("write script");
    let output = run_in(dir.path(), &["run", "iterator", "three-items", "script.json"]);
    assert_eq!(output.status.code(), Some(2), "an over-limit script is an input error");
    assert!(output.stdout.is_empty(), "no step ran, so nothing is printed");
    assert!(String::from_utf8_lossy(&output.stderr).contains("limit is 1"), "limit should be reported");
}

#[test]
fn config_validate_reports_invalid_files() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("bad.toml"), "[pool]\nmax_size = 0\n").expect("write config");
    let output = run_in(dir.path(), &["--config", "bad.toml", "config", "validate"]);
    assert_eq!(output.status.code(), Some(2));
    fs::write(dir.path().join("good.toml"), "[pool]\nmax_size = 2\n").expect("write config");
    let output = run_in(dir.path(), &["--config", "good.toml", "config", "validate"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "Config valid.");
}

#[test]
fn audit_file_receives_one_line_per_verification() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("pattern-catalog.toml"), "[audit]\nenabled = true\npath = \"audit.jsonl\"\n")
        .expect("write config");
    let output = run_in(dir.path(), &["verify", "singleton"]);
    assert_eq!(output.status.code(), Some(0));
    let audit = fs::read_to_string(dir.path().join("audit.jsonl")).expect("audit log");
    assert_eq!(audit.lines().count(), 2, "one event per singleton entry: {audit}");
    for line in audit.lines() {
        serde_json::from_str::<Value>(line).expect("audit lines are json");
    }
}
