//! Date-keyed cache of raw station files and date-range selection.
//!
//! The cache holds the unparsed text of every downloaded file, keyed by the
//! calendar date embedded in its filename. Parsing is deferred until a range
//! is selected, so each plot or export works from fresh typed series.

use std::collections::HashMap;
use std::mem::replace;
use std::sync::LazyLock;

use chrono::{NaiveDate, TimeDelta};
use rayon::prelude::*;
use regex::Regex;
use thiserror::Error;

use crate::parsers::{Parseable, Series, Source, StationCsv};

/// Display/key format for calendar dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<day>\d{2})_(?<month>\d{2})_(?<year>\d{4})(?<outside>_outside)?\.csv$")
        .expect("Failed to compile filename regex")
});

/// Errors reported when selecting a date range
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Start date falls after end date
    #[error("Start date {start} must be before or equal to end date {end}")]
    InvalidRange { start: String, end: String },

    /// No indoor records exist anywhere in the range
    #[error("No indoor data available for {start} to {end}")]
    NoData { start: String, end: String },
}

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

/// Map a remote filename to its date and source.
///
/// `DD_MM_YYYY.csv` is indoor, `DD_MM_YYYY_outside.csv` is outdoor. Anything
/// else, including impossible calendar dates, is ignored.
pub fn classify_filename(name: &str) -> Option<(NaiveDate, Source)> {
    let caps = FILENAME_PATTERN.captures(name)?;
    let day = caps["day"].parse().ok()?;
    let month = caps["month"].parse().ok()?;
    let year = caps["year"].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let source = if caps.name("outside").is_some() {
        Source::Outdoor
    } else {
        Source::Indoor
    };
    Some((date, source))
}

/// Parse a `DD/MM/YYYY` date key
pub fn parse_date_key(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Format a date as a `DD/MM/YYYY` key
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Result of a successful range selection
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pub indoor: Series,
    /// `None` when no outdoor records exist in the range
    pub outdoor: Option<Series>,
    /// Number of indoor files that contributed
    pub indoor_days: usize,
    /// Number of outdoor files that contributed
    pub outdoor_days: usize,
    /// Lines dropped by the parser across every file in the range
    pub skipped_lines: usize,
}

/// In-memory cache of raw daily files for both sources
#[derive(Clone, Debug, Default)]
pub struct SeriesStore {
    indoor: HashMap<NaiveDate, String>,
    outdoor: HashMap<NaiveDate, String>,
    /// Union of both key sets, ascending, no duplicates
    available_dates: Vec<NaiveDate>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file's contents, replacing any earlier blob for the same key
    pub fn insert(&mut self, source: Source, date: NaiveDate, contents: String) {
        let map = match source {
            Source::Indoor => &mut self.indoor,
            Source::Outdoor => &mut self.outdoor,
        };
        map.insert(date, contents);

        if let Err(pos) = self.available_dates.binary_search(&date) {
            self.available_dates.insert(pos, date);
        }
    }

    /// Classify `filename` and store it; returns `None` for unrecognized names
    pub fn insert_file(&mut self, filename: &str, contents: String) -> Option<(NaiveDate, Source)> {
        let (date, source) = classify_filename(filename)?;
        self.insert(source, date, contents);
        Some((date, source))
    }

    pub fn blob(&self, source: Source, date: NaiveDate) -> Option<&str> {
        let map = match source {
            Source::Indoor => &self.indoor,
            Source::Outdoor => &self.outdoor,
        };
        map.get(&date).map(String::as_str)
    }

    pub fn available_dates(&self) -> &[NaiveDate] {
        &self.available_dates
    }

    pub fn indoor_count(&self) -> usize {
        self.indoor.len()
    }

    pub fn outdoor_count(&self) -> usize {
        self.outdoor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indoor.is_empty() && self.outdoor.is_empty()
    }

    /// Parse and merge every cached day in `[start, end]` for both sources.
    ///
    /// The range is validated before the cache is consulted. An empty
    /// indoor result is an error; an empty outdoor result is not.
    pub fn select_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Selection, SelectionError> {
        if start > end {
            tracing::warn!("Invalid date range: start ({}) > end ({})", start, end);
            return Err(SelectionError::InvalidRange {
                start: format_date_key(start),
                end: format_date_key(end),
            });
        }

        let (indoor, indoor_days, indoor_skipped) = self.collect_source(Source::Indoor, start, end);
        let (outdoor, outdoor_days, outdoor_skipped) =
            self.collect_source(Source::Outdoor, start, end);

        if indoor.is_empty() {
            tracing::warn!("No indoor data found between {} and {}", start, end);
            return Err(SelectionError::NoData {
                start: format_date_key(start),
                end: format_date_key(end),
            });
        }

        tracing::info!(
            "Selected {} indoor records from {} files, {} outdoor records from {} files",
            indoor.len(),
            indoor_days,
            outdoor.len(),
            outdoor_days
        );

        Ok(Selection {
            indoor,
            outdoor: (!outdoor.is_empty()).then_some(outdoor),
            indoor_days,
            outdoor_days,
            skipped_lines: indoor_skipped + outdoor_skipped,
        })
    }

    /// Returns the merged series, the number of files that yielded data and
    /// the number of skipped lines
    fn collect_source(&self, source: Source, start: NaiveDate, end: NaiveDate) -> (Series, usize, usize) {
        let blobs: Vec<(NaiveDate, &str)> = DateRange(start, end)
            .filter_map(|date| self.blob(source, date).map(|blob| (date, blob)))
            .collect();

        tracing::debug!(
            "Found {} {} files between {} and {}",
            blobs.len(),
            source,
            start,
            end
        );

        // Order of `collect` matches the day order, so concatenation stays stable
        let reports: Vec<_> = blobs
            .par_iter()
            .map(|(date, blob)| {
                let report = StationCsv.parse(blob);
                if report.series.is_empty() {
                    tracing::warn!("No valid {} data found for {}", source, format_date_key(*date));
                }
                report
            })
            .collect();

        let skipped = reports.iter().map(|r| r.skipped.len()).sum();
        let days = reports.iter().filter(|r| !r.series.is_empty()).count();
        let series = Series::concat(reports.into_iter().map(|r| r.series));
        (series, days, skipped)
    }
}
