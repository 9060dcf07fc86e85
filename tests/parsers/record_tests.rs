//! Tests for the station CSV record parser
//!
//! Tests cover:
//! - Field round-trips for well-formed lines
//! - Dropped lines and their reasons
//! - Humidity placeholders
//! - Header/blank handling and ordering

use envplot::parsers::{LineError, Parseable, StationCsv};

use crate::common::assertions::assert_sorted;
use crate::common::datetime;
use crate::common::float_cmp::*;
use crate::common::synthetic;

// ============================================
// Well-formed Lines
// ============================================

#[test]
fn test_fields_roundtrip_exactly() {
    let report = StationCsv.parse("15/06/2024 13:45,12,23.456,1008.25,61.5");
    assert!(report.skipped.is_empty());
    assert_eq!(report.series.len(), 1);

    let sample = report.series.samples()[0];
    assert_eq!(sample.timestamp, datetime(15, 6, 2024, 13, 45));
    assert_eq!(sample.sample_size, 12);
    assert_approx_eq(sample.temperature, 23.456, f64::EPSILON);
    assert_approx_eq(sample.pressure, 1008.25, f64::EPSILON);
    assert_eq!(sample.humidity, Some(61.5));
}

#[test]
fn test_fields_are_trimmed() {
    let report = StationCsv.parse("  01/02/2024 08:00 , 3 , -1.5 , 1020.0 , 80  ");
    let sample = report.series.samples()[0];
    assert_eq!(sample.sample_size, 3);
    assert_eq!(sample.temperature, -1.5);
    assert_eq!(sample.humidity, Some(80.0));
}

#[test]
fn test_extra_fields_are_ignored() {
    let report = StationCsv.parse("01/02/2024 08:00,3,5.0,1020.0,80,extra,columns");
    assert_eq!(report.series.len(), 1);
    assert!(report.skipped.is_empty());
}

// ============================================
// Dropped Lines
// ============================================

#[test]
fn test_short_lines_drop_exactly_one_each() {
    let blob = [
        "01/01/2024 00:00,10,20.0,1013.0,50",
        "01/01/2024 00:10,10,20.1",
        "01/01/2024 00:20,10,20.2,1013.0,50",
        "garbage",
    ]
    .join("\n");

    let report = StationCsv.parse(&blob);
    assert_eq!(report.series.len(), 2);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].line_number, 2);
    assert_eq!(report.skipped[0].reason, LineError::TooFewFields { found: 3 });
    assert_eq!(report.skipped[1].reason, LineError::TooFewFields { found: 1 });
}

#[test]
fn test_bad_fields_report_their_reason() {
    let cases = [
        ("2024-01-01 00:00,10,20.0,1013.0", "timestamp"),
        ("01/01/2024 00:00,ten,20.0,1013.0", "sample size"),
        ("01/01/2024 00:00,-1,20.0,1013.0", "sample size"),
        ("01/01/2024 00:00,10,warm,1013.0", "temperature"),
        ("01/01/2024 00:00,10,20.0,", "pressure"),
    ];

    for (line, expected) in cases {
        let report = StationCsv.parse(line);
        assert!(report.series.is_empty(), "'{}' should be dropped", line);
        let reason = report.skipped[0].reason.to_string();
        assert!(
            reason.contains(expected),
            "'{}' should fail on {}, got '{}'",
            line,
            expected,
            reason
        );
    }
}

#[test]
fn test_impossible_timestamp_dropped() {
    let report = StationCsv.parse("30/02/2024 10:00,10,20.0,1013.0,50");
    assert!(report.series.is_empty());
    assert!(matches!(report.skipped[0].reason, LineError::Timestamp(_)));
}

// ============================================
// Humidity
// ============================================

#[test]
fn test_humidity_placeholders_are_absent() {
    for raw in ["N/A", "NA", "n/a", "", "  ", "sensor error"] {
        let line = format!("01/01/2024 00:00,10,20.0,1013.0,{}", raw);
        let report = StationCsv.parse(&line);
        assert_eq!(report.series.len(), 1, "'{}' must not drop the line", raw);
        assert_eq!(report.series.samples()[0].humidity, None);
    }
}

#[test]
fn test_missing_humidity_column_is_absent() {
    let report = StationCsv.parse("01/01/2024 00:00,10,20.0,1013.0");
    assert_eq!(report.series.samples()[0].humidity, None);
}

// ============================================
// Whole Files
// ============================================

#[test]
fn test_header_and_blank_lines_skipped_silently() {
    let blob = format!(
        "{}\n\n01/01/2024 00:00,10,20.0,1013.0,50\n\n",
        synthetic::HEADER
    );
    let report = StationCsv.parse(&blob);
    assert_eq!(report.series.len(), 1);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_empty_input_gives_empty_series() {
    assert!(StationCsv.parse("").series.is_empty());
    assert!(StationCsv.parse(synthetic::HEADER).series.is_empty());
}

#[test]
fn test_out_of_order_lines_are_sorted_stably() {
    let blob = [
        "01/01/2024 02:00,1,3.0,1000.0",
        "01/01/2024 01:00,1,1.0,1000.0",
        "01/01/2024 02:00,1,4.0,1000.0",
        "01/01/2024 00:30,1,0.5,1000.0",
    ]
    .join("\r\n");

    let report = StationCsv.parse(&blob);
    assert_sorted(&report.series);
    let temps: Vec<f64> = report.series.iter().map(|s| s.temperature).collect();
    assert_eq!(temps, vec![0.5, 1.0, 3.0, 4.0]);
}

#[test]
fn test_full_day_file() {
    let blob = synthetic::day_file(crate::common::date(1, 3, 2024), 10, 18.0);
    let report = StationCsv.parse(&blob);
    assert_eq!(report.series.len(), 144);
    assert!(report.skipped.is_empty());
    assert_sorted(&report.series);
}
