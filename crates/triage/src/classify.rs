//! Single-line classification: rule table → confidence policy → timestamp.

use std::sync::Arc;

use crate::record::AnnotatedRecord;
use crate::rules::{Confidence, RuleTable};
use crate::timestamp::extract_timestamp;

/// Turns one raw line into one annotated record.
///
/// Pure function of its input: no side effects, total over all strings
/// including empty lines. Cheap to clone; the compiled rule table is shared.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<RuleTable>,
}

impl Classifier {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Classify one line. Always succeeds: unmatched lines take the fallback
    /// category and an unparseable timestamp is simply absent.
    pub fn classify_line(&self, line: &str) -> AnnotatedRecord {
        let probable_cause = self.table.classify(line).to_string();
        let confidence = Confidence::for_category(&probable_cause);
        let timestamp = extract_timestamp(line);

        AnnotatedRecord {
            log_line: line.to_string(),
            probable_cause,
            confidence,
            timestamp,
            suggestion: None,
        }
    }
}
