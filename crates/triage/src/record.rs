use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::rules::Confidence;

/// One classified log line.
///
/// Created once per input line by the classifier; the original line is kept
/// unmodified. `suggestion` stays absent until the caller attaches one.
/// Serializes as ISO-8601 for the timestamp, with `suggestion` omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    /// Original raw line (always preserved).
    pub log_line: String,

    /// Category name from the rule table (or its fallback).
    pub probable_cause: String,

    /// Derived from `probable_cause` via the confidence policy.
    pub confidence: Confidence,

    /// Embedded timestamp, if the line carried a parseable one.
    pub timestamp: Option<NaiveDateTime>,

    /// Remediation text, attached after classification on request.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

/// Per-confidence tally. Serializes as `{"High": n, "Medium": n, "Low": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceCounts {
    #[serde(rename = "High")]
    pub high: u64,
    #[serde(rename = "Medium")]
    pub medium: u64,
    #[serde(rename = "Low")]
    pub low: u64,
}

impl ConfidenceCounts {
    pub fn tally(&mut self, confidence: Confidence) {
        match confidence {
            Confidence::High => self.high += 1,
            Confidence::Medium => self.medium += 1,
            Confidence::Low => self.low += 1,
        }
    }

    pub fn count(&self, confidence: Confidence) -> u64 {
        match confidence {
            Confidence::High => self.high,
            Confidence::Medium => self.medium,
            Confidence::Low => self.low,
        }
    }

    pub fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }
}

/// Result of one batch analysis: aggregate counts plus the ordered records.
///
/// Derived and read-only; recomputed fresh on every batch call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub total_errors: usize,
    pub unknown_errors: usize,
    pub confidence_counts: ConfidenceCounts,
    pub records: Vec<AnnotatedRecord>,
}

impl BatchResult {
    /// The aggregate-counts view handed to collaborators that don't need
    /// the detailed records.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_errors: self.total_errors,
            unknown_errors: self.unknown_errors,
            confidence_counts: self.confidence_counts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_errors: usize,
    pub unknown_errors: usize,
    pub confidence_counts: ConfidenceCounts,
}

/// Tally records per category, sorted by descending occurrence count.
/// Ties keep first-seen order. Feeds grouped views downstream.
pub fn group_by_cause(records: &[AnnotatedRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(cause, _)| *cause == record.probable_cause) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.probable_cause.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
