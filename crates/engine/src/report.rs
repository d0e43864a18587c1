//! Result rendering
//!
//! Plain-text summary and JSON export over finished [`TestGroup`] results.
//! The text form mirrors what an interactive result view shows: a group
//! header with pass/fail counts and elapsed time, one status line per case,
//! and detail text on demand. The JSON form is the structured export.

use simpletest_core::{TestCase, TestGroup};
use std::fmt::Write as _;

/// Render a multi-line text summary of a finished run.
///
/// One header line per group, then one indented line per case. Failed
/// cases carry their one-line failure summary.
pub fn render_summary(groups: &[TestGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let passed = group.cases.iter().filter(|c| c.passed).count();
        let failed = group.cases.len() - passed;
        let _ = writeln!(
            out,
            "{} Passed: {passed} Failed: {failed} ({}ms)",
            group.name, group.elapsed_ms
        );
        for case in &group.cases {
            let status = if case.passed { "passed" } else { "FAILED" };
            let _ = write!(out, "  {} {status} ({}ms)", case.name, case.elapsed_ms);
            if !case.passed {
                let _ = write!(out, " - {}", case.error_message);
            }
            let _ = writeln!(out);
        }
    }
    out
}

/// Detail text for one case, as a result view would show when the case is
/// selected: exception details when the case failed outside the assertion
/// chain, the accumulated assertion detail trace otherwise.
pub fn render_case_details(case: &TestCase) -> &str {
    if !case.exception_details.is_empty() {
        &case.exception_details
    } else {
        &case.assertion_details
    }
}

/// Export a finished run as pretty-printed JSON.
pub fn render_json(groups: &[TestGroup]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(groups)
}
