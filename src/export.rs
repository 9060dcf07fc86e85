//! CSV export of a selected date range.
//!
//! One row per indoor sample (raw values, never smoothed). When the range has
//! outdoor data, outdoor temperature and pressure are left-joined on the
//! formatted `Date/Time`; the first outdoor sample with a matching time wins.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::analysis::AugmentedSeries;
use crate::parsers::{Sample, Series};
use crate::pipeline::ExportContext;

pub const INDOOR_HEADERS: [&str; 6] = [
    "Date/Time",
    "Sample Size",
    "Indoor Temperature (°C)",
    "Indoor Pressure (hPa)",
    "Humidity (%RH)",
    "Feels Like (°C)",
];

pub const OUTDOOR_HEADERS: [&str; 2] = ["Outdoor Temperature (°C)", "Outdoor Pressure (hPa)"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One output line
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRow {
    pub date_time: String,
    pub sample_size: u32,
    pub indoor_temperature: f64,
    pub indoor_pressure: f64,
    pub humidity: Option<f64>,
    pub feels_like: f64,
    pub outdoor_temperature: Option<f64>,
    pub outdoor_pressure: Option<f64>,
}

/// Rows plus whether the outdoor columns belong in the output
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
    pub include_outdoor: bool,
}

impl ExportTable {
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = INDOOR_HEADERS.to_vec();
        if self.include_outdoor {
            headers.extend_from_slice(&OUTDOOR_HEADERS);
        }
        headers
    }
}

/// Join indoor rows with outdoor readings taken at the same minute
pub fn build_export_rows(indoor: &AugmentedSeries, outdoor: Option<&Series>) -> ExportTable {
    let mut outdoor_by_time: HashMap<String, &Sample> = HashMap::new();
    if let Some(outdoor) = outdoor {
        for sample in outdoor {
            outdoor_by_time.entry(sample.formatted_time()).or_insert(sample);
        }
    }

    let rows = indoor
        .rows()
        .iter()
        .map(|row| {
            let date_time = row.sample.formatted_time();
            let matched = outdoor_by_time.get(&date_time);
            ExportRow {
                sample_size: row.sample.sample_size,
                indoor_temperature: row.sample.temperature,
                indoor_pressure: row.sample.pressure,
                humidity: row.sample.humidity,
                feels_like: row.feels_like,
                outdoor_temperature: matched.map(|s| s.temperature),
                outdoor_pressure: matched.map(|s| s.pressure),
                date_time,
            }
        })
        .collect();

    ExportTable {
        rows,
        include_outdoor: outdoor.is_some_and(|s| !s.is_empty()),
    }
}

/// Render a reading, keeping a decimal point on whole values
fn number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

/// Write `table` as CSV with a header row
pub fn write_export<W: Write>(writer: W, table: &ExportTable) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;

    for row in &table.rows {
        let mut record = vec![
            row.date_time.clone(),
            row.sample_size.to_string(),
            number(row.indoor_temperature),
            number(row.indoor_pressure),
            cell(row.humidity),
            number(row.feels_like),
        ];
        if table.include_outdoor {
            record.push(cell(row.outdoor_temperature));
            record.push(cell(row.outdoor_pressure));
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Build and write the export for `context` to `path`; returns the row count
pub fn export_to_path(context: &ExportContext, path: &Path) -> Result<usize, ExportError> {
    let table = build_export_rows(&context.indoor, context.outdoor.as_ref());
    let file = File::create(path)?;
    write_export(file, &table)?;
    tracing::info!("Exported {} rows to {}", table.rows.len(), path.display());
    Ok(table.rows.len())
}
