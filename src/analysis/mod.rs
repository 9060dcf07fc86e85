//! Smoothing and derivation stage.
//!
//! Raw channels are smoothed first ([`filters::smooth`]); the feels-like
//! temperature is then derived per sample from the smoothed values into an
//! [`AugmentedSeries`]. The augmented rows are copies, so the canonical
//! series is never modified.

pub mod derived;
pub mod filters;

pub use derived::heat_index;
pub use filters::{smooth, SmoothingLevel, SmoothingMethod};

use chrono::NaiveDateTime;

use crate::parsers::{Sample, Series};

/// A sample together with its derived feels-like temperature
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AugmentedSample {
    pub sample: Sample,
    /// Heat index in °C
    pub feels_like: f64,
}

/// A series with a feels-like value for every sample, in the same order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AugmentedSeries {
    rows: Vec<AugmentedSample>,
}

impl AugmentedSeries {
    /// Derive feels-like for every sample of `series`
    pub fn from_series(series: &Series) -> Self {
        let rows = series
            .iter()
            .map(|sample| AugmentedSample {
                sample: *sample,
                feels_like: heat_index(sample.temperature, sample.humidity),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[AugmentedSample] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&AugmentedSample> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.rows.iter().map(|r| r.sample.timestamp)
    }
}
