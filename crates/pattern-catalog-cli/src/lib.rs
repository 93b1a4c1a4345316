// crates/pattern-catalog-cli/src/lib.rs
// ============================================================================
// Module: Pattern Catalog CLI Library
// Description: Shared helpers for the pattern-catalog binary.
// Purpose: Expose localization and report rendering for reuse and tests.
// Dependencies: pattern-catalog-core, pattern-catalog-config, serde_json
// ============================================================================

//! ## Overview
//! Library half of the `pattern-catalog` binary: the message catalog and the
//! renderers that turn verification reports into text, JSON, or Markdown.

pub mod i18n;
pub mod report;
