//! Glue between the store and the consumers of a selection.
//!
//! Plotting: select → smooth → augment. Export: select → augment (raw
//! values, no smoothing). Each call builds fresh series, so changing the
//! range or the smoothing level never reuses stale data.

use chrono::NaiveDate;

use crate::analysis::{smooth, AugmentedSeries, SmoothingMethod};
use crate::parsers::Series;
use crate::store::{SelectionError, SeriesStore};

/// Everything the chart needs for one generated plot
#[derive(Clone, Debug, Default)]
pub struct PlotContext {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Smoothed indoor samples with feels-like derived from the smoothed values
    pub indoor: AugmentedSeries,
    /// Smoothed outdoor samples, when the range has any
    pub outdoor: Option<Series>,
    pub window: usize,
    pub method: SmoothingMethod,
    pub skipped_lines: usize,
}

impl PlotContext {
    pub fn has_outdoor(&self) -> bool {
        self.outdoor.is_some()
    }
}

/// Unsmoothed data prepared for export
#[derive(Clone, Debug, Default)]
pub struct ExportContext {
    pub indoor: AugmentedSeries,
    pub outdoor: Option<Series>,
}

/// Select `[start, end]`, smooth both sources with the same window and
/// method, then derive feels-like for indoor
pub fn prepare_plot(
    store: &SeriesStore,
    start: NaiveDate,
    end: NaiveDate,
    window: usize,
    method: SmoothingMethod,
) -> Result<PlotContext, SelectionError> {
    let selection = store.select_range(start, end)?;

    let indoor = smooth(&selection.indoor, window, method);
    let outdoor = selection
        .outdoor
        .as_ref()
        .map(|series| smooth(series, window, method));

    tracing::debug!(
        "Prepared plot: {} indoor, {} outdoor samples (window {}, {})",
        indoor.len(),
        outdoor.as_ref().map_or(0, Series::len),
        window,
        method
    );

    Ok(PlotContext {
        start,
        end,
        indoor: AugmentedSeries::from_series(&indoor),
        outdoor,
        window,
        method,
        skipped_lines: selection.skipped_lines,
    })
}

/// Select `[start, end]` and derive feels-like from the raw values
pub fn prepare_export(store: &SeriesStore, start: NaiveDate, end: NaiveDate) -> Result<ExportContext, SelectionError> {
    let selection = store.select_range(start, end)?;
    Ok(ExportContext {
        indoor: AugmentedSeries::from_series(&selection.indoor),
        outdoor: selection.outdoor,
    })
}
