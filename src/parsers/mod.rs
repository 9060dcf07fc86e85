pub mod record;
pub mod types;

pub use record::{LineError, StationCsv};
pub use types::{ParseReport, Parseable, Sample, Series, SkippedLine, Source, TIMESTAMP_FORMAT};
