//! Embedded-timestamp extraction from raw log lines.
//!
//! Best-effort: a single numeric-token heuristic, not a log-format parser.
//! Everything here fails soft; an unparseable token never aborts a batch.

use chrono::{NaiveDate, NaiveDateTime};

/// Shortest digit run considered a timestamp candidate (`YYYYMMDD`).
const MIN_RUN_LEN: usize = 8;
/// Longest digit run considered a timestamp candidate (`YYYYMMDDHHMMSS`).
const MAX_RUN_LEN: usize = 14;

/// Extract the embedded timestamp from a line, if any.
///
/// Scans for the first maximal run of consecutive ASCII digits whose length
/// is between 8 and 14. Runs longer than 14 digits are skipped and the scan
/// continues past them. The first qualifying run decides the outcome: exactly
/// 8 digits parse as `YYYYMMDD` (midnight time component), exactly 14 digits
/// parse as `YYYYMMDDHHMMSS`, and any other length yields `None` without
/// considering later runs. Structurally invalid dates (month 13, hour 99)
/// also yield `None`.
pub fn extract_timestamp(line: &str) -> Option<NaiveDateTime> {
    let token = first_candidate_run(line)?;
    match token.len() {
        8 => NaiveDate::parse_from_str(token, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        14 => NaiveDateTime::parse_from_str(token, "%Y%m%d%H%M%S").ok(),
        _ => None,
    }
}

/// Find the first maximal digit run of length 8..=14.
///
/// A run is maximal when bounded by non-digits or the ends of the line, so a
/// 16-digit identifier is not a candidate and does not stop the scan.
fn first_candidate_run(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if !bytes[pos].is_ascii_digit() {
            pos += 1;
            continue;
        }

        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }

        let run_len = pos - start;
        if (MIN_RUN_LEN..=MAX_RUN_LEN).contains(&run_len) {
            // Digit runs are ASCII, so this slice is on char boundaries.
            return Some(&line[start..pos]);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_eight_digit_date() {
        let ts = extract_timestamp("Backup failed 20240115 disk full").expect("Should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 0, 0));
    }

    #[test]
    fn test_fourteen_digit_datetime() {
        let ts =
            extract_timestamp("ERROR at 20240115093045 connection lost").expect("Should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (9, 30, 45));
    }

    #[test]
    fn test_short_run_yields_nothing() {
        assert_eq!(extract_timestamp("retry 123 scheduled"), None);
        assert_eq!(extract_timestamp("worker 1234567 idle"), None);
    }

    #[test]
    fn test_intermediate_length_yields_nothing() {
        // 10 digits is a candidate run but not a supported format.
        assert_eq!(extract_timestamp("epoch 1705312245 reached"), None);
    }

    #[test]
    fn test_intermediate_run_ends_the_search() {
        // The first qualifying run (10 digits) decides; the valid 8-digit
        // date after it is never considered.
        assert_eq!(extract_timestamp("id 1234567890 at 20240115"), None);
    }

    #[test]
    fn test_overlong_run_is_skipped() {
        // 16 digits is not a candidate; the scan continues to the date.
        let ts = extract_timestamp("trace 1234567890123456 at 20240115").expect("Should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
    }

    #[test]
    fn test_first_of_two_valid_runs_wins() {
        let ts = extract_timestamp("from 20240101 to 20240215").expect("Should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 1));
    }

    #[test]
    fn test_invalid_month_fails_soft() {
        assert_eq!(extract_timestamp("stamp 20241315 rejected"), None);
    }

    #[test]
    fn test_invalid_time_fails_soft() {
        // Hour 99 in an otherwise well-formed 14-digit token.
        assert_eq!(extract_timestamp("stamp 20240115993045 rejected"), None);
    }

    #[test]
    fn test_no_digits_at_all() {
        assert_eq!(extract_timestamp("plain text line"), None);
        assert_eq!(extract_timestamp(""), None);
    }

    #[test]
    fn test_run_at_line_boundaries() {
        assert!(extract_timestamp("20240115").is_some());
        assert!(extract_timestamp("20240115 start of line").is_some());
        assert!(extract_timestamp("end of line 20240115").is_some());
    }

    #[test]
    fn test_digits_embedded_in_token() {
        // Maximal runs are bounded by non-digits, not whitespace, so a date
        // glued to letters still counts.
        let ts = extract_timestamp("job-20240115-backup failed").expect("Should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
    }
}
