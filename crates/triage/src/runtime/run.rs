//! Run — read input lines, analyze, attach suggestions, emit the report.

use std::io::Read;

use serde::Serialize;
use tracing::{info, warn};

use crate::conf::EngineConfig;
use crate::record::{group_by_cause, AnnotatedRecord, BatchSummary};
use crate::state::SharedState;
use crate::suggest::attach_suggestions;

/// The JSON document printed on stdout: aggregate summary plus the ordered
/// detailed records.
#[derive(Serialize)]
struct AnalysisReport<'a> {
    summary: BatchSummary,
    records: &'a [AnnotatedRecord],
}

/// Drive one batch: gather lines, classify, optionally attach suggestions,
/// and print the report.
pub async fn run(
    state: SharedState,
    config: EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();

    let lines = if paths.is_empty() {
        info!("No input files given, reading log lines from stdin");
        read_stdin_lines()?
    } else {
        read_file_lines(&paths)
    };

    info!("Total log lines: {}", lines.len());
    if lines.is_empty() {
        warn!("No log lines to analyze");
    }

    let mut result = if config.parallelism > 1 {
        state
            .analyzer
            .analyze_concurrent(lines, config.parallelism)
            .await
    } else {
        state.analyzer.analyze(lines)
    };

    if config.ai_assist {
        let failures = attach_suggestions(&mut result.records);
        state
            .metrics
            .record_suggestions(result.records.len() as u64, failures as u64);
        if failures > 0 {
            warn!("{} suggestion(s) failed and were substituted", failures);
        }
    }

    for (cause, count) in group_by_cause(&result.records) {
        info!("{} ({} occurrences)", cause, count);
    }

    let report = AnalysisReport {
        summary: result.summary(),
        records: &result.records,
    };
    let json = if config.output_pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    let snapshot = state.metrics.snapshot();
    info!(
        "Classified {} lines: {} unknown, {} with timestamps",
        snapshot.lines_classified, snapshot.unknown_category, snapshot.timestamps_extracted
    );

    Ok(())
}

/// Read every input file, decoding lossily. A file that cannot be read is
/// logged and skipped; the remaining files still contribute lines.
fn read_file_lines(paths: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for path in paths {
        match std::fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                lines.extend(non_blank_lines(&content));
            }
            Err(e) => warn!("Could not read file {}: {}", path, e),
        }
    }
    lines
}

fn read_stdin_lines() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    std::io::stdin().read_to_end(&mut buffer)?;
    let content = String::from_utf8_lossy(&buffer);
    Ok(non_blank_lines(&content))
}

/// Blank lines are filtered here, before the engine: the analyzer itself
/// never skips a line it receives.
fn non_blank_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_lines_filters_whitespace() {
        let content = "ERROR one\n\n   \n\tdisk full\n";
        assert_eq!(non_blank_lines(content), vec!["ERROR one", "\tdisk full"]);
    }

    #[test]
    fn test_non_blank_lines_empty_content() {
        assert!(non_blank_lines("").is_empty());
        assert!(non_blank_lines("\n\n").is_empty());
    }
}
