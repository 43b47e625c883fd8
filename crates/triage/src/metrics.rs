use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::rules::Confidence;

/// Engine-wide classification counters.
///
/// All operations use `Ordering::Relaxed`; these counters are observability
/// only and never required for correctness. Share via `Arc`.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub lines_classified: AtomicU64,
    pub high_confidence: AtomicU64,
    pub medium_confidence: AtomicU64,
    pub low_confidence: AtomicU64,
    pub unknown_category: AtomicU64,
    pub timestamps_extracted: AtomicU64,
    pub suggestions_generated: AtomicU64,
    pub suggestion_failures: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified line. Hottest path; called once per record.
    #[inline]
    pub fn record_classification(
        &self,
        confidence: Confidence,
        has_timestamp: bool,
        is_unknown: bool,
    ) {
        self.lines_classified.fetch_add(1, Ordering::Relaxed);
        match confidence {
            Confidence::High => self.high_confidence.fetch_add(1, Ordering::Relaxed),
            Confidence::Medium => self.medium_confidence.fetch_add(1, Ordering::Relaxed),
            Confidence::Low => self.low_confidence.fetch_add(1, Ordering::Relaxed),
        };
        if has_timestamp {
            self.timestamps_extracted.fetch_add(1, Ordering::Relaxed);
        }
        if is_unknown {
            self.unknown_category.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a suggestion-attachment pass.
    #[inline]
    pub fn record_suggestions(&self, generated: u64, failures: u64) {
        self.suggestions_generated.fetch_add(generated, Ordering::Relaxed);
        self.suggestion_failures.fetch_add(failures, Ordering::Relaxed);
    }

    /// Snapshot for logging or export. Individual reads are atomic but the
    /// snapshot as a whole is not transactional; fine for observability.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_classified: self.lines_classified.load(Ordering::Relaxed),
            high_confidence: self.high_confidence.load(Ordering::Relaxed),
            medium_confidence: self.medium_confidence.load(Ordering::Relaxed),
            low_confidence: self.low_confidence.load(Ordering::Relaxed),
            unknown_category: self.unknown_category.load(Ordering::Relaxed),
            timestamps_extracted: self.timestamps_extracted.load(Ordering::Relaxed),
            suggestions_generated: self.suggestions_generated.load(Ordering::Relaxed),
            suggestion_failures: self.suggestion_failures.load(Ordering::Relaxed),
        }
    }
}

/// A read-only snapshot of engine metrics, cheap to clone and serialize.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub lines_classified: u64,
    pub high_confidence: u64,
    pub medium_confidence: u64,
    pub low_confidence: u64,
    pub unknown_category: u64,
    pub timestamps_extracted: u64,
    pub suggestions_generated: u64,
    pub suggestion_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_empty() {
        let metrics = EngineMetrics::new();
        let snap = metrics.snapshot();
        assert_eq!(snap.lines_classified, 0);
        assert_eq!(snap.timestamps_extracted, 0);
        assert_eq!(snap.suggestion_failures, 0);
    }

    #[test]
    fn test_record_classification_counts() {
        let metrics = EngineMetrics::new();
        metrics.record_classification(Confidence::High, true, false);
        metrics.record_classification(Confidence::High, false, false);
        metrics.record_classification(Confidence::Low, false, true);

        let snap = metrics.snapshot();
        assert_eq!(snap.lines_classified, 3);
        assert_eq!(snap.high_confidence, 2);
        assert_eq!(snap.medium_confidence, 0);
        assert_eq!(snap.low_confidence, 1);
        assert_eq!(snap.unknown_category, 1);
        assert_eq!(snap.timestamps_extracted, 1);
    }

    #[test]
    fn test_record_suggestions() {
        let metrics = EngineMetrics::new();
        metrics.record_suggestions(5, 1);
        metrics.record_suggestions(2, 0);

        let snap = metrics.snapshot();
        assert_eq!(snap.suggestions_generated, 7);
        assert_eq!(snap.suggestion_failures, 1);
    }
}
