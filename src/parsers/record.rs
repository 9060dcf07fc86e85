use chrono::NaiveDateTime;
use thiserror::Error;

use super::types::{ParseReport, Parseable, Sample, Series, SkippedLine, TIMESTAMP_FORMAT};

/// Prefix of the optional header row written by the station firmware
const HEADER_PREFIX: &str = "Date,Sample";

/// Minimum number of comma-separated fields in a data row
const MIN_FIELDS: usize = 4;

/// Why a single record line was dropped
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LineError {
    #[error("insufficient data ({found} fields, need at least 4)")]
    TooFewFields { found: usize },

    #[error("invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("invalid sample size '{0}'")]
    SampleSize(String),

    #[error("invalid temperature '{0}'")]
    Temperature(String),

    #[error("invalid pressure '{0}'")]
    Pressure(String),
}

/// Parser for the station's daily CSV files:
/// `DD/MM/YYYY HH:MM,<sample_size>,<temperature>,<pressure>[,<humidity>]`
///
/// No quoting or escaping is supported. Indoor files carry humidity in the
/// fifth column; outdoor files usually omit it or write `N/A`.
pub struct StationCsv;

impl Parseable for StationCsv {
    fn parse(&self, file_contents: &str) -> ParseReport {
        let mut samples = Vec::new();
        let mut skipped = Vec::new();

        for (index, line) in file_contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(HEADER_PREFIX) {
                continue;
            }

            match parse_record(line) {
                Ok(sample) => samples.push(sample),
                Err(reason) => {
                    tracing::warn!("Skipping line {}: {} ({})", index + 1, line, reason);
                    skipped.push(SkippedLine {
                        line_number: index + 1,
                        content: line.to_string(),
                        reason,
                    });
                }
            }
        }

        if samples.is_empty() {
            tracing::warn!("No valid records parsed from {} bytes", file_contents.len());
        } else {
            tracing::debug!(
                "Parsed {} records ({} skipped)",
                samples.len(),
                skipped.len()
            );
        }

        ParseReport {
            series: Series::from_unsorted(samples),
            skipped,
        }
    }
}

/// Parse one non-header, non-blank record line
pub fn parse_record(line: &str) -> Result<Sample, LineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Err(LineError::TooFewFields {
            found: fields.len(),
        });
    }

    let timestamp = NaiveDateTime::parse_from_str(fields[0], TIMESTAMP_FORMAT)
        .map_err(|_| LineError::Timestamp(fields[0].to_string()))?;
    let sample_size = fields[1]
        .parse::<u32>()
        .map_err(|_| LineError::SampleSize(fields[1].to_string()))?;
    let temperature = fields[2]
        .parse::<f64>()
        .map_err(|_| LineError::Temperature(fields[2].to_string()))?;
    let pressure = fields[3]
        .parse::<f64>()
        .map_err(|_| LineError::Pressure(fields[3].to_string()))?;
    let humidity = fields.get(4).and_then(|raw| parse_humidity(raw));

    Ok(Sample {
        timestamp,
        sample_size,
        temperature,
        pressure,
        humidity,
    })
}

/// Humidity is optional: placeholders and unparsable text both mean "absent"
fn parse_humidity(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("N/A") || raw.eq_ignore_ascii_case("NA") {
        return None;
    }
    raw.parse::<f64>().ok()
}
