//! Batch analysis: per-line classification plus aggregate counts.

use std::sync::Arc;

use futures_util::future;
use tracing::warn;

use crate::classify::Classifier;
use crate::metrics::EngineMetrics;
use crate::record::{AnnotatedRecord, BatchResult, ConfidenceCounts};
use crate::rules::RuleTable;

/// Applies the classifier to every line of a batch, in input order, and
/// derives the aggregate counts.
///
/// Stateless across calls beyond relaxed metric counters: every `analyze`
/// invocation is independent, so concurrent batches need no locking.
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: Classifier,
    metrics: Arc<EngineMetrics>,
}

impl Analyzer {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self::with_metrics(table, Arc::new(EngineMetrics::new()))
    }

    pub fn with_metrics(table: Arc<RuleTable>, metrics: Arc<EngineMetrics>) -> Self {
        Self {
            classifier: Classifier::new(table),
            metrics,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }

    /// Classify every line in input order and compute aggregate counts.
    ///
    /// Never drops or reorders lines, blank ones included; pre-filtering is
    /// the caller's choice. Empty input yields zero counts and no records.
    pub fn analyze<I, S>(&self, lines: I) -> BatchResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<AnnotatedRecord> = lines
            .into_iter()
            .map(|line| self.classifier.classify_line(line.as_ref()))
            .collect();
        self.finish(records)
    }

    /// Order-preserving concurrent variant of [`analyze`](Self::analyze).
    ///
    /// Chunks the input across at most `parallelism` blocking tasks and
    /// reassembles records in input order, so the result is identical to the
    /// sequential path. A chunk whose task dies is reclassified inline.
    pub async fn analyze_concurrent(&self, lines: Vec<String>, parallelism: usize) -> BatchResult {
        if parallelism <= 1 || lines.len() <= 1 {
            return self.analyze(lines);
        }

        let lines: Arc<[String]> = lines.into();
        let workers = parallelism.min(lines.len());
        let chunk_size = lines.len().div_ceil(workers);

        let mut handles = Vec::with_capacity(workers);
        let mut ranges = Vec::with_capacity(workers);
        let mut start = 0;
        while start < lines.len() {
            let end = (start + chunk_size).min(lines.len());
            let classifier = self.classifier.clone();
            let chunk_lines = Arc::clone(&lines);
            handles.push(tokio::task::spawn_blocking(move || {
                chunk_lines[start..end]
                    .iter()
                    .map(|line| classifier.classify_line(line))
                    .collect::<Vec<_>>()
            }));
            ranges.push(start..end);
            start = end;
        }

        let mut records = Vec::with_capacity(lines.len());
        for (joined, range) in future::join_all(handles).await.into_iter().zip(ranges) {
            match joined {
                Ok(chunk) => records.extend(chunk),
                Err(e) => {
                    warn!("Classification task failed ({}), reclassifying chunk inline", e);
                    records.extend(
                        lines[range]
                            .iter()
                            .map(|line| self.classifier.classify_line(line)),
                    );
                }
            }
        }

        self.finish(records)
    }

    /// Final sequential pass: aggregate counts over the ordered records.
    fn finish(&self, records: Vec<AnnotatedRecord>) -> BatchResult {
        let fallback = self.classifier.table().fallback_category();
        let mut confidence_counts = ConfidenceCounts::default();
        let mut unknown_errors = 0;

        for record in &records {
            confidence_counts.tally(record.confidence);
            let is_unknown = record.probable_cause == fallback;
            if is_unknown {
                unknown_errors += 1;
            }
            self.metrics
                .record_classification(record.confidence, record.timestamp.is_some(), is_unknown);
        }

        BatchResult {
            total_errors: records.len(),
            unknown_errors,
            confidence_counts,
            records,
        }
    }
}
