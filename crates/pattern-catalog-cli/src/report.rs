// crates/pattern-catalog-cli/src/report.rs
// ============================================================================
// Module: Report Rendering
// Description: Text, JSON, and Markdown views of verification reports.
// Purpose: Keep report formatting out of the command dispatcher.
// Dependencies: pattern-catalog-config, pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Renders [`VerificationReport`] slices. Text and Markdown go through the
//! message catalog; JSON is the serialized report array.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_config::OutputFormat;
use pattern_catalog_core::VerificationReport;

use crate::t;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `reports` in `format`.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when JSON encoding fails.
pub fn render(reports: &[VerificationReport], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => serde_json::to_string_pretty(reports),
        OutputFormat::Markdown => Ok(render_markdown(reports)),
    }
}

/// One block per entry followed by a summary line.
#[must_use]
pub fn render_text(reports: &[VerificationReport]) -> String {
    let mut lines = Vec::new();
    for report in reports {
        let total = report.results.len();
        let passed = total - report.failed_count();
        lines.push(if report.passed() {
            t!("verify.entry.pass", category = report.category, entry = report.entry, passed = passed, total = total)
        } else {
            t!("verify.entry.fail", category = report.category, entry = report.entry, passed = passed, total = total)
        });
        for result in &report.results {
            lines.push(if result.passed {
                t!("verify.check.pass", check = result.description)
            } else {
                t!(
                    "verify.check.fail",
                    check = result.description,
                    detail = result.detail.as_deref().unwrap_or_default()
                )
            });
        }
    }
    lines.push(summary(reports));
    lines.join("\n")
}

/// One table row per check.
#[must_use]
pub fn render_markdown(reports: &[VerificationReport]) -> String {
    let mut lines = vec![t!("verify.markdown.header"), t!("verify.markdown.separator")];
    for report in reports {
        for result in &report.results {
            let outcome = if result.passed { t!("verify.result.pass") } else { t!("verify.result.fail") };
            lines.push(t!(
                "verify.markdown.row",
                category = report.category,
                entry = report.entry,
                check = escape_cell(&result.description),
                result = outcome,
                detail = escape_cell(result.detail.as_deref().unwrap_or_default())
            ));
        }
    }
    lines.join("\n")
}

/// Entry and failure counts.
fn summary(reports: &[VerificationReport]) -> String {
    let failed = reports.iter().filter(|report| !report.passed()).count();
    t!("verify.summary", entries = reports.len(), failed = failed)
}

/// Escapes table delimiters inside a Markdown cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::escape_cell;

    #[test]
    fn cells_escape_pipes_and_newlines() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b c");
    }
}
