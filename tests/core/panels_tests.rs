//! Tests for chart panel data
//!
//! Tests cover:
//! - Lines drawn per panel with and without outdoor data
//! - Outdoor pressure calibration
//! - Pressure axis padding
//! - Humidity gaps

use envplot::analysis::AugmentedSeries;
use envplot::panels::{
    panel_lines, pressure_axis_range, LineRole, Panel, ViewMode, OUTDOOR_PRESSURE_OFFSET_HPA,
};
use envplot::parsers::{Sample, Series};

use crate::common::datetime;
use crate::common::float_cmp::*;

fn sample(hour: u32, pressure: f64, humidity: Option<f64>) -> Sample {
    Sample {
        timestamp: datetime(5, 5, 2024, hour, 0),
        sample_size: 10,
        temperature: 18.0 + hour as f64,
        pressure,
        humidity,
    }
}

fn indoor(samples: Vec<Sample>) -> AugmentedSeries {
    AugmentedSeries::from_series(&Series::from_unsorted(samples))
}

fn roles(panel: Panel, indoor: &AugmentedSeries, outdoor: Option<&Series>) -> Vec<LineRole> {
    panel_lines(panel, indoor, outdoor)
        .iter()
        .map(|l| l.role)
        .collect()
}

#[test]
fn test_roles_without_outdoor() {
    let data = indoor(vec![sample(0, 1010.0, Some(40.0))]);
    assert_eq!(roles(Panel::Temperature, &data, None), vec![LineRole::IndoorTemperature]);
    assert_eq!(roles(Panel::Humidity, &data, None), vec![LineRole::IndoorHumidity]);
    assert_eq!(roles(Panel::Pressure, &data, None), vec![LineRole::IndoorPressure]);
    assert_eq!(
        roles(Panel::FeelsLike, &data, None),
        vec![LineRole::FeelsLike, LineRole::ActualTemperature]
    );
}

#[test]
fn test_outdoor_overlays_temperature_and_pressure_only() {
    let data = indoor(vec![sample(0, 1010.0, Some(40.0))]);
    let outdoor = Series::from_unsorted(vec![sample(0, 1012.0, None)]);

    assert_eq!(
        roles(Panel::Temperature, &data, Some(&outdoor)),
        vec![LineRole::IndoorTemperature, LineRole::OutdoorTemperature]
    );
    assert_eq!(
        roles(Panel::Pressure, &data, Some(&outdoor)),
        vec![LineRole::IndoorPressure, LineRole::OutdoorPressure]
    );
    assert_eq!(roles(Panel::Humidity, &data, Some(&outdoor)).len(), 1);
    assert_eq!(roles(Panel::FeelsLike, &data, Some(&outdoor)).len(), 2);
}

#[test]
fn test_outdoor_pressure_is_offset() {
    let data = indoor(vec![sample(0, 1010.0, None)]);
    let outdoor = Series::from_unsorted(vec![sample(0, 1012.0, None)]);
    let lines = panel_lines(Panel::Pressure, &data, Some(&outdoor));

    let outdoor_line = lines
        .iter()
        .find(|l| l.role == LineRole::OutdoorPressure)
        .unwrap();
    assert_eq!(outdoor_line.segments[0][0][1], 1012.0 + OUTDOOR_PRESSURE_OFFSET_HPA);
    assert_eq!(OUTDOOR_PRESSURE_OFFSET_HPA, -1.0);
}

#[test]
fn test_humidity_breaks_across_absent_samples() {
    let data = indoor(vec![
        sample(0, 1010.0, Some(40.0)),
        sample(1, 1010.0, Some(41.0)),
        sample(2, 1010.0, None),
        sample(3, 1010.0, Some(43.0)),
    ]);
    let lines = panel_lines(Panel::Humidity, &data, None);
    assert_eq!(lines[0].segments.len(), 2);
    assert_eq!(lines[0].point_count(), 3);
}

#[test]
fn test_pressure_padding_minimum_one_hpa() {
    let data = indoor(vec![sample(0, 1010.0, None), sample(1, 1012.0, None)]);
    let (lo, hi) = pressure_axis_range(&data, None).unwrap();
    assert_approx_eq(lo, 1009.0, DEFAULT_TOLERANCE);
    assert_approx_eq(hi, 1013.0, DEFAULT_TOLERANCE);
}

#[test]
fn test_pressure_padding_five_percent_and_outdoor_offset() {
    let data = indoor(vec![sample(0, 980.0, None)]);
    // Offset outdoor values: 1019 and 1029
    let outdoor = Series::from_unsorted(vec![sample(0, 1020.0, None), sample(1, 1030.0, None)]);
    let (lo, hi) = pressure_axis_range(&data, Some(&outdoor)).unwrap();
    // Range 980..1029 = 49, padding 2.45
    assert_approx_eq(lo, 977.55, DEFAULT_TOLERANCE);
    assert_approx_eq(hi, 1031.45, DEFAULT_TOLERANCE);
}

#[test]
fn test_pressure_range_empty() {
    assert!(pressure_axis_range(&AugmentedSeries::default(), None).is_none());
}

#[test]
fn test_view_mode_order() {
    assert_eq!(
        ViewMode::All.panels(),
        vec![Panel::Temperature, Panel::Humidity, Panel::Pressure, Panel::FeelsLike]
    );
    assert_eq!(ViewMode::All.label(), "All Graphs");
}
