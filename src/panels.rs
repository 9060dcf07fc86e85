//! Chart data contract: which panels exist, what each one draws, and the
//! numeric preparation (downsampling, axis padding, calibration) that
//! happens before anything reaches the plotting widget.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::analysis::AugmentedSeries;
use crate::hover::time_to_x;
use crate::parsers::Series;

/// Fixed calibration applied to outdoor pressure when it is drawn.
/// Export keeps the raw reading.
// TODO: expose as a user setting once a second station is supported
pub const OUTDOOR_PRESSURE_OFFSET_HPA: f64 = -1.0;

/// Minimum padding around the pressure axis range
pub const MIN_PRESSURE_PADDING_HPA: f64 = 1.0;

/// Fractional padding around the pressure axis range
pub const PRESSURE_PADDING_FRACTION: f64 = 0.05;

/// Maximum points drawn per line (LTTB downsampling above this)
pub const MAX_CHART_POINTS: usize = 2000;

/// One chart panel
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Display, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Panel {
    #[default]
    #[strum(serialize = "Temperature")]
    Temperature,
    #[strum(serialize = "Humidity")]
    Humidity,
    #[strum(serialize = "Pressure")]
    Pressure,
    #[strum(serialize = "Feels Like")]
    FeelsLike,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Temperature => "Temperature Over Time",
            Panel::Humidity => "Humidity Over Time (Indoor Only)",
            Panel::Pressure => "Atmospheric Pressure Over Time",
            Panel::FeelsLike => "Feels Like Temperature Over Time",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Panel::Temperature | Panel::FeelsLike => "Temperature (°C)",
            Panel::Humidity => "Humidity (%RH)",
            Panel::Pressure => "Pressure (hPa)",
        }
    }

    /// Stable id for the plot widget
    pub fn plot_id(&self) -> &'static str {
        match self {
            Panel::Temperature => "panel_temperature",
            Panel::Humidity => "panel_humidity",
            Panel::Pressure => "panel_pressure",
            Panel::FeelsLike => "panel_feels_like",
        }
    }
}

/// Grid of all four panels, or one panel maximized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    All,
    Single(Panel),
}

impl ViewMode {
    /// Panels in display order (row-major for the 2×2 grid)
    pub fn panels(&self) -> Vec<Panel> {
        match self {
            ViewMode::All => vec![
                Panel::Temperature,
                Panel::Humidity,
                Panel::Pressure,
                Panel::FeelsLike,
            ],
            ViewMode::Single(panel) => vec![*panel],
        }
    }

    pub fn label(&self) -> String {
        match self {
            ViewMode::All => "All Graphs".to_string(),
            ViewMode::Single(panel) => panel.to_string(),
        }
    }
}

/// Line roles; the renderer maps each to a color and width
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRole {
    IndoorTemperature,
    OutdoorTemperature,
    IndoorHumidity,
    IndoorPressure,
    OutdoorPressure,
    FeelsLike,
    ActualTemperature,
}

impl LineRole {
    pub fn name(&self) -> &'static str {
        match self {
            LineRole::IndoorTemperature => "Indoor Temperature",
            LineRole::OutdoorTemperature => "Outdoor Temperature",
            LineRole::IndoorHumidity => "Indoor Humidity",
            LineRole::IndoorPressure => "Indoor Pressure",
            LineRole::OutdoorPressure => "Outdoor Pressure",
            LineRole::FeelsLike => "Feels Like",
            LineRole::ActualTemperature => "Actual Temp",
        }
    }
}

/// A drawable line. `segments` are split where values are missing so the
/// renderer never bridges a gap.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLine {
    pub role: LineRole,
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl PanelLine {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Build every line for `panel`. Outdoor data only overlays temperature and
/// pressure, and its pressure is shifted by [`OUTDOOR_PRESSURE_OFFSET_HPA`].
pub fn panel_lines(panel: Panel, indoor: &AugmentedSeries, outdoor: Option<&Series>) -> Vec<PanelLine> {
    let indoor_points = |value: &dyn Fn(usize) -> Option<f64>| -> Vec<Vec<[f64; 2]>> {
        segments(
            indoor
                .rows()
                .iter()
                .enumerate()
                .map(|(i, row)| (time_to_x(row.sample.timestamp), value(i))),
        )
    };
    let rows = indoor.rows();

    let mut lines = Vec::new();
    match panel {
        Panel::Temperature => {
            lines.push(PanelLine {
                role: LineRole::IndoorTemperature,
                segments: indoor_points(&|i| Some(rows[i].sample.temperature)),
            });
            if let Some(outdoor) = outdoor {
                lines.push(PanelLine {
                    role: LineRole::OutdoorTemperature,
                    segments: segments(
                        outdoor
                            .iter()
                            .map(|s| (time_to_x(s.timestamp), Some(s.temperature))),
                    ),
                });
            }
        }
        Panel::Humidity => {
            lines.push(PanelLine {
                role: LineRole::IndoorHumidity,
                segments: indoor_points(&|i| rows[i].sample.humidity),
            });
        }
        Panel::Pressure => {
            lines.push(PanelLine {
                role: LineRole::IndoorPressure,
                segments: indoor_points(&|i| Some(rows[i].sample.pressure)),
            });
            if let Some(outdoor) = outdoor {
                lines.push(PanelLine {
                    role: LineRole::OutdoorPressure,
                    segments: segments(outdoor.iter().map(|s| {
                        (
                            time_to_x(s.timestamp),
                            Some(s.pressure + OUTDOOR_PRESSURE_OFFSET_HPA),
                        )
                    })),
                });
            }
        }
        Panel::FeelsLike => {
            lines.push(PanelLine {
                role: LineRole::FeelsLike,
                segments: indoor_points(&|i| Some(rows[i].feels_like)),
            });
            lines.push(PanelLine {
                role: LineRole::ActualTemperature,
                segments: indoor_points(&|i| Some(rows[i].sample.temperature)),
            });
        }
    }
    lines
}

/// Split `(x, y)` pairs into runs of present values
fn segments<I>(points: I) -> Vec<Vec<[f64; 2]>>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    let mut result = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (x, y) in points {
        match y {
            Some(y) => current.push([x, y]),
            None if !current.is_empty() => result.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Y range that the pressure panel must include: the span of indoor and
/// (offset) outdoor pressure padded by 5% or 1 hPa, whichever is larger
pub fn pressure_axis_range(indoor: &AugmentedSeries, outdoor: Option<&Series>) -> Option<(f64, f64)> {
    let indoor_values = indoor.rows().iter().map(|r| r.sample.pressure);
    let outdoor_values = outdoor
        .into_iter()
        .flat_map(|s| s.iter().map(|s| s.pressure + OUTDOOR_PRESSURE_OFFSET_HPA));

    let (min, max) = indoor_values
        .chain(outdoor_values)
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let padding = ((max - min) * PRESSURE_PADDING_FRACTION).max(MIN_PRESSURE_PADDING_HPA);
    Some((min - padding, max + padding))
}

/// Downsample data using the LTTB (Largest Triangle Three Buckets) algorithm.
/// This preserves visual characteristics while reducing point count for performance.
pub fn downsample_lttb(points: &[[f64; 2]], target_points: usize) -> Vec<[f64; 2]> {
    let n = points.len();

    if n <= target_points || target_points < 3 {
        return points.to_vec();
    }

    let mut result = Vec::with_capacity(target_points);

    // Always include first point
    result.push(points[0]);

    let bucket_size = (n - 2) as f64 / (target_points - 2) as f64;
    let mut a_index = 0usize;

    for i in 0..(target_points - 2) {
        let bucket_start = ((i as f64 + 1.0) * bucket_size).floor() as usize + 1;
        let bucket_end = (((i + 2) as f64) * bucket_size).floor() as usize + 1;
        let bucket_end = bucket_end.min(n - 1);

        // Average of the next bucket is the third triangle vertex
        let next_bucket_start = bucket_end;
        let next_bucket_end = ((((i + 3) as f64) * bucket_size).floor() as usize + 1).min(n);

        let (avg_x, avg_y) = if next_bucket_start < next_bucket_end {
            let bucket = &points[next_bucket_start..next_bucket_end];
            let count = bucket.len() as f64;
            let sum_x: f64 = bucket.iter().map(|p| p[0]).sum();
            let sum_y: f64 = bucket.iter().map(|p| p[1]).sum();
            (sum_x / count, sum_y / count)
        } else {
            (points[n - 1][0], points[n - 1][1])
        };

        let [a_x, a_y] = points[a_index];
        let mut max_area = -1.0f64;
        let mut max_index = bucket_start;

        for (j, p) in points.iter().enumerate().take(bucket_end).skip(bucket_start) {
            let area = ((a_x - avg_x) * (p[1] - a_y) - (a_x - p[0]) * (avg_y - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_index = j;
            }
        }

        result.push(points[max_index]);
        a_index = max_index;
    }

    // Always include last point
    result.push(points[n - 1]);

    result
}
