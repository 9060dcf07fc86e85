use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumIter};

use super::record::LineError;

/// Timestamp format used inside station records and in every user-facing label
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Which sensor feed a file or series belongs to
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum Source {
    Indoor,
    Outdoor,
}

/// One environmental reading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// Number of raw sensor readings aggregated into this row
    pub sample_size: u32,
    /// Degrees Celsius
    pub temperature: f64,
    /// hPa
    pub pressure: f64,
    /// Percent relative humidity; `None` when the record carried no usable value
    pub humidity: Option<f64>,
}

impl Sample {
    /// Timestamp rendered as `DD/MM/YYYY HH:MM`
    pub fn formatted_time(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Time-ordered samples for one source.
///
/// The samples are kept private so the ordering invariant cannot be broken
/// from outside: every constructor stable-sorts by timestamp, which keeps
/// duplicates in their original order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from samples in any order
    pub fn from_unsorted(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// Concatenate several series (in the given order) and re-sort the result
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Series>,
    {
        let samples = parts.into_iter().flat_map(|s| s.samples).collect();
        Self::from_unsorted(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// First and last timestamp, if any
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// A line the parser dropped, kept so callers can surface it
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number within the blob
    pub line_number: usize,
    pub content: String,
    pub reason: LineError,
}

/// Output of parsing one file's worth of text
#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    pub series: Series,
    pub skipped: Vec<SkippedLine>,
}

/// Trait for station log parsers. Parsing is infallible: bad lines are
/// dropped and reported in [`ParseReport::skipped`].
pub trait Parseable {
    fn parse(&self, data: &str) -> ParseReport;
}
