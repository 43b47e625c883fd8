//! Deterministic remediation suggestions.
//!
//! Template-based text keyed on confidence; no model inference happens here
//! despite what downstream UIs may call it.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::NaiveDateTime;
use tracing::warn;

use crate::record::AnnotatedRecord;
use crate::rules::Confidence;

/// Substituted when a single record's suggestion generation fails.
pub const FAILURE_PLACEHOLDER: &str = "AI suggestion failed safely.";

/// Returned for records with an empty log line.
pub const EMPTY_LINE_SUGGESTION: &str = "No log line provided.";

/// Build the remediation suggestion for one record.
pub fn suggest(record: &AnnotatedRecord) -> String {
    suggest_parts(
        &record.log_line,
        &record.probable_cause,
        record.confidence,
        record.timestamp,
    )
}

/// By-parts form for callers holding unpacked record fields.
///
/// Empty lines short-circuit; otherwise the template is keyed on confidence
/// and a trailing date is appended when a timestamp is present, using the
/// date portion only even when the timestamp carried a time.
pub fn suggest_parts(
    log_line: &str,
    probable_cause: &str,
    confidence: Confidence,
    timestamp: Option<NaiveDateTime>,
) -> String {
    if log_line.is_empty() {
        return EMPTY_LINE_SUGGESTION.to_string();
    }

    let mut suggestion = match confidence {
        Confidence::High => format!("Immediate attention recommended: {}.", probable_cause),
        Confidence::Medium => format!("Investigate potential issues: {}.", probable_cause),
        Confidence::Low => format!("Possible fix or check context: {}.", probable_cause),
    };

    if let Some(ts) = timestamp {
        suggestion.push_str(&format!(" Occurred on {}.", ts.format("%Y-%m-%d")));
    }

    suggestion
}

/// Fill the `suggestion` field of every record, isolating failures.
///
/// Each generation runs behind a panic guard: a failing record gets
/// [`FAILURE_PLACEHOLDER`] and a warning, and the remaining records are still
/// processed. Returns the number of substitutions made.
pub fn attach_suggestions(records: &mut [AnnotatedRecord]) -> usize {
    let mut failures = 0;

    for record in records.iter_mut() {
        let generated = catch_unwind(AssertUnwindSafe(|| suggest(record)));
        record.suggestion = Some(match generated {
            Ok(text) => text,
            Err(_) => {
                warn!(
                    "Suggestion generation failed for line {:?}, substituting placeholder",
                    record.log_line
                );
                failures += 1;
                FAILURE_PLACEHOLDER.to_string()
            }
        });
    }

    failures
}
