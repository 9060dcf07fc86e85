//! Smoothing filters for station series.
//!
//! Windows are centered and shrink at the edges (minimum one sample), so a
//! smoothed series always has the same length and order as its input.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::parsers::{Sample, Series};

/// Aggregation applied inside each smoothing window
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Display, EnumIter, EnumString, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SmoothingMethod {
    #[default]
    Median,
    Mean,
}

impl SmoothingMethod {
    pub fn label(&self) -> &'static str {
        match self {
            SmoothingMethod::Median => "Median",
            SmoothingMethod::Mean => "Mean",
        }
    }
}

/// Window presets offered in the UI
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingLevel {
    #[default]
    #[strum(serialize = "None")]
    Off,
    #[strum(serialize = "Low (10 points)")]
    Low,
    #[strum(serialize = "Medium (50 points)")]
    Medium,
    #[strum(serialize = "High (100 points)")]
    High,
    #[strum(serialize = "Very High (250 points)")]
    VeryHigh,
    #[strum(serialize = "Extreme (500 points)")]
    Extreme,
}

impl SmoothingLevel {
    /// Window size in samples
    pub fn window(&self) -> usize {
        match self {
            SmoothingLevel::Off => 1,
            SmoothingLevel::Low => 10,
            SmoothingLevel::Medium => 50,
            SmoothingLevel::High => 100,
            SmoothingLevel::VeryHigh => 250,
            SmoothingLevel::Extreme => 500,
        }
    }
}

/// Smooth temperature, humidity and pressure independently.
///
/// `window <= 1` returns the series unchanged. Timestamps and sample sizes
/// pass through untouched.
pub fn smooth(series: &Series, window: usize, method: SmoothingMethod) -> Series {
    if window <= 1 || series.is_empty() {
        return series.clone();
    }

    let samples = series.samples();
    let temperature: Vec<Option<f64>> = samples.iter().map(|s| Some(s.temperature)).collect();
    let pressure: Vec<Option<f64>> = samples.iter().map(|s| Some(s.pressure)).collect();
    let humidity: Vec<Option<f64>> = samples.iter().map(|s| s.humidity).collect();

    let temperature = rolling(&temperature, window, method);
    let pressure = rolling(&pressure, window, method);
    let humidity = rolling(&humidity, window, method);

    let smoothed: Vec<Sample> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| Sample {
            timestamp: s.timestamp,
            sample_size: s.sample_size,
            // Present in every window since the input is always present
            temperature: temperature[i].unwrap_or(s.temperature),
            pressure: pressure[i].unwrap_or(s.pressure),
            humidity: humidity[i],
        })
        .collect();

    // Input is already sorted and timestamps are unchanged, so this keeps order
    Series::from_unsorted(smoothed)
}

fn rolling(data: &[Option<f64>], window: usize, method: SmoothingMethod) -> Vec<Option<f64>> {
    match method {
        SmoothingMethod::Median => centered_median(data, window),
        SmoothingMethod::Mean => centered_mean(data, window),
    }
}

/// Inclusive bounds of the centered window for index `i`
#[inline]
fn window_bounds(i: usize, len: usize, window: usize) -> (usize, usize) {
    let start = i.saturating_sub(window / 2);
    let end = (i + (window - 1) / 2).min(len - 1);
    (start, end)
}

/// Centered rolling mean that ignores missing values
pub fn centered_mean(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if data.is_empty() || window == 0 {
        return data.to_vec();
    }

    // Prefix sums of present values and of their counts
    let mut sums = Vec::with_capacity(data.len() + 1);
    let mut counts = Vec::with_capacity(data.len() + 1);
    sums.push(0.0);
    counts.push(0usize);
    for value in data {
        let (sum, count) = (sums[sums.len() - 1], counts[counts.len() - 1]);
        match value {
            Some(v) => {
                sums.push(sum + v);
                counts.push(count + 1);
            }
            None => {
                sums.push(sum);
                counts.push(count);
            }
        }
    }

    (0..data.len())
        .map(|i| {
            let (start, end) = window_bounds(i, data.len(), window);
            let count = counts[end + 1] - counts[start];
            (count > 0).then(|| (sums[end + 1] - sums[start]) / count as f64)
        })
        .collect()
}

/// Centered rolling median that ignores missing values
pub fn centered_median(data: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if data.is_empty() || window == 0 {
        return data.to_vec();
    }

    let mut result = Vec::with_capacity(data.len());
    let mut buffer: Vec<f64> = Vec::with_capacity(window);

    for i in 0..data.len() {
        let (start, end) = window_bounds(i, data.len(), window);

        buffer.clear();
        buffer.extend(data[start..=end].iter().flatten().copied());
        if buffer.is_empty() {
            result.push(None);
            continue;
        }
        buffer.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mid = buffer.len() / 2;
        #[allow(clippy::manual_is_multiple_of)]
        let median = if buffer.len() % 2 == 0 {
            (buffer[mid - 1] + buffer[mid]) / 2.0
        } else {
            buffer[mid]
        };
        result.push(Some(median));
    }

    result
}
