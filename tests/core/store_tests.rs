//! Tests for the date-keyed store and range selection
//!
//! Tests cover:
//! - Filename classification
//! - Available dates
//! - Range validation and empty results
//! - Multi-day merging

use envplot::parsers::Source;
use envplot::store::{classify_filename, SelectionError, SeriesStore};

use crate::common::assertions::assert_sorted;
use crate::common::{date, datetime, synthetic};

fn store_with(entries: &[(&str, &str)]) -> SeriesStore {
    let mut store = SeriesStore::new();
    for (name, contents) in entries {
        assert!(
            store.insert_file(name, contents.to_string()).is_some(),
            "{} should be recognized",
            name
        );
    }
    store
}

// ============================================
// Filename Classification
// ============================================

#[test]
fn test_classify_indoor_and_outdoor() {
    assert_eq!(
        classify_filename("28_02_2024.csv"),
        Some((date(28, 2, 2024), Source::Indoor))
    );
    assert_eq!(
        classify_filename("29_02_2024_outside.csv"),
        Some((date(29, 2, 2024), Source::Outdoor))
    );
}

#[test]
fn test_classify_rejects_other_names() {
    for name in [
        "29_02_2023.csv",
        "01_13_2024.csv",
        "01-01-2024.csv",
        "01_01_2024_inside.csv",
        "01_01_2024.CSV",
        "log.txt",
        "",
    ] {
        assert_eq!(classify_filename(name), None, "{} should be ignored", name);
    }
}

#[test]
fn test_insert_file_ignores_unknown_names() {
    let mut store = SeriesStore::new();
    assert!(store.insert_file("readme.csv", "x".into()).is_none());
    assert!(store.is_empty());
    assert!(store.available_dates().is_empty());
}

// ============================================
// Range Selection
// ============================================

#[test]
fn test_invalid_range_reported_before_lookup() {
    let store = SeriesStore::new();
    let err = store
        .select_range(date(2, 1, 2024), date(1, 1, 2024))
        .unwrap_err();
    assert!(matches!(err, SelectionError::InvalidRange { .. }));
    assert!(err.to_string().contains("02/01/2024"));
}

#[test]
fn test_no_matching_keys_is_distinct_from_invalid_range() {
    let store = store_with(&[("05_01_2024.csv", "05/01/2024 00:00,1,20.0,1010.0,50")]);
    let err = store
        .select_range(date(1, 1, 2024), date(3, 1, 2024))
        .unwrap_err();
    assert_eq!(
        err,
        SelectionError::NoData {
            start: "01/01/2024".to_string(),
            end: "03/01/2024".to_string(),
        }
    );
}

#[test]
fn test_only_unparsable_indoor_is_no_data() {
    let store = store_with(&[("01_01_2024.csv", "not,a,record")]);
    let err = store
        .select_range(date(1, 1, 2024), date(1, 1, 2024))
        .unwrap_err();
    assert!(matches!(err, SelectionError::NoData { .. }));
}

#[test]
fn test_outdoor_absent_is_not_an_error() {
    let store = store_with(&[("01_01_2024.csv", "01/01/2024 00:00,1,20.0,1010.0,50")]);
    let selection = store.select_range(date(1, 1, 2024), date(1, 1, 2024)).unwrap();
    assert_eq!(selection.indoor.len(), 1);
    assert!(selection.outdoor.is_none());
    assert_eq!(selection.outdoor_days, 0);
}

#[test]
fn test_multi_day_merge_is_sorted_and_bounded() {
    let store = store_with(&[
        ("01_01_2024.csv", synthetic::day_file(date(1, 1, 2024), 60, 18.0).as_str()),
        ("02_01_2024.csv", synthetic::day_file(date(2, 1, 2024), 60, 19.0).as_str()),
        ("03_01_2024.csv", synthetic::day_file(date(3, 1, 2024), 60, 20.0).as_str()),
        ("02_01_2024_outside.csv", synthetic::day_file(date(2, 1, 2024), 30, 5.0).as_str()),
    ]);

    let selection = store.select_range(date(2, 1, 2024), date(3, 1, 2024)).unwrap();
    assert_eq!(selection.indoor.len(), 48);
    assert_eq!(selection.indoor_days, 2);
    assert_sorted(&selection.indoor);
    assert_eq!(
        selection.indoor.time_span(),
        Some((datetime(2, 1, 2024, 0, 0), datetime(3, 1, 2024, 23, 0)))
    );

    let outdoor = selection.outdoor.expect("outdoor data for 02/01");
    assert_eq!(outdoor.len(), 48);
    assert_eq!(selection.outdoor_days, 1);
}

#[test]
fn test_gaps_in_range_are_skipped() {
    let store = store_with(&[
        ("01_01_2024.csv", "01/01/2024 12:00,1,20.0,1010.0,50"),
        ("10_01_2024.csv", "10/01/2024 12:00,1,21.0,1011.0,51"),
    ]);
    let selection = store.select_range(date(1, 1, 2024), date(31, 1, 2024)).unwrap();
    assert_eq!(selection.indoor.len(), 2);
    assert_eq!(selection.indoor_days, 2);
}

#[test]
fn test_skipped_lines_are_counted() {
    let store = store_with(&[(
        "01_01_2024.csv",
        "01/01/2024 00:00,1,20.0,1010.0,50\nbroken\n01/01/2024 00:10,1,20.0",
    )]);
    let selection = store.select_range(date(1, 1, 2024), date(1, 1, 2024)).unwrap();
    assert_eq!(selection.indoor.len(), 1);
    assert_eq!(selection.skipped_lines, 2);
}

#[test]
fn test_reinserting_a_day_replaces_it() {
    let mut store = SeriesStore::new();
    store.insert(Source::Indoor, date(1, 1, 2024), "01/01/2024 00:00,1,1.0,1010.0".into());
    store.insert(Source::Indoor, date(1, 1, 2024), "01/01/2024 00:00,1,2.0,1010.0".into());
    let selection = store.select_range(date(1, 1, 2024), date(1, 1, 2024)).unwrap();
    assert_eq!(selection.indoor.len(), 1);
    assert_eq!(selection.indoor.samples()[0].temperature, 2.0);
    assert_eq!(store.available_dates().len(), 1);
}
