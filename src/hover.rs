//! Cursor-driven value lookup for the chart panels.
//!
//! The renderer hands a [`HoverContext`] (the indoor series currently on
//! screen) to the lookup step together with the pointer position in plot
//! coordinates. The lookup finds the nearest sample in time and formats a
//! label for the active panel; it never modifies the series.

use chrono::{DateTime, NaiveDateTime, TimeDelta};

use crate::analysis::{AugmentedSample, AugmentedSeries};
use crate::panels::Panel;
use crate::parsers::TIMESTAMP_FORMAT;

/// Maximum distance between the cursor and a sample for a label to appear
pub const HOVER_TOLERANCE: TimeDelta = TimeDelta::hours(2);

/// Relative position past which the tooltip flips to the other side
pub const TOOLTIP_FLIP_THRESHOLD: f64 = 0.7;

/// Convert a timestamp to the chart's x coordinate (seconds since the Unix
/// epoch, treating the naive time as UTC)
pub fn time_to_x(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`time_to_x`]; the result carries no timezone
pub fn x_to_time(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    let millis = (x * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}

/// Visible window of a panel in plot coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    /// Position of `(x, y)` within the window, 0.0 at min and 1.0 at max.
    /// A zero-width axis reports 0.0.
    pub fn relative(&self, x: f64, y: f64) -> (f64, f64) {
        fn rel(v: f64, lo: f64, hi: f64) -> f64 {
            let span = hi - lo;
            if span.abs() < f64::EPSILON || !span.is_finite() {
                0.0
            } else {
                (v - lo) / span
            }
        }
        (rel(x, self.x_min, self.x_max), rel(y, self.y_min, self.y_max))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalSide {
    #[default]
    Right,
    Left,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalSide {
    #[default]
    Above,
    Below,
}

/// Where the tooltip sits relative to the hovered point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TooltipPlacement {
    pub horizontal: HorizontalSide,
    pub vertical: VerticalSide,
}

impl TooltipPlacement {
    /// Flip to the left in the right 30% of the panel and below in the top 30%
    pub fn from_relative(x_rel: f64, y_rel: f64) -> Self {
        Self {
            horizontal: if x_rel > TOOLTIP_FLIP_THRESHOLD {
                HorizontalSide::Left
            } else {
                HorizontalSide::Right
            },
            vertical: if y_rel > TOOLTIP_FLIP_THRESHOLD {
                VerticalSide::Below
            } else {
                VerticalSide::Above
            },
        }
    }

    /// Screen offset of the tooltip from its anchor, in points (y up)
    pub fn offset_points(&self) -> [f32; 2] {
        let dx = match self.horizontal {
            HorizontalSide::Right => 20.0,
            HorizontalSide::Left => -120.0,
        };
        let dy = match self.vertical {
            VerticalSide::Above => 40.0,
            VerticalSide::Below => -40.0,
        };
        [dx, dy]
    }
}

/// A transient tooltip produced by [`HoverContext::lookup`]
#[derive(Clone, Debug, PartialEq)]
pub struct HoverLabel {
    /// Index of the chosen sample in the hovered series
    pub index: usize,
    pub text: String,
    /// Point the tooltip is attached to, in plot coordinates
    pub anchor: [f64; 2],
    pub placement: TooltipPlacement,
}

/// The series the hover lookup may query, captured at render time
#[derive(Clone, Copy, Debug)]
pub struct HoverContext<'a> {
    series: &'a AugmentedSeries,
}

impl<'a> HoverContext<'a> {
    pub fn new(series: &'a AugmentedSeries) -> Self {
        Self { series }
    }

    /// Index of the sample closest in time to `cursor` and its distance.
    ///
    /// Equal distances (including duplicate timestamps) resolve to the
    /// lowest index.
    pub fn nearest(&self, cursor: NaiveDateTime) -> Option<(usize, TimeDelta)> {
        let rows = self.series.rows();
        if rows.is_empty() {
            return None;
        }

        // First sample at or after the cursor
        let after = rows.partition_point(|r| r.sample.timestamp < cursor);

        let next = rows
            .get(after)
            .map(|r| (after, r.sample.timestamp - cursor));
        let prev = after.checked_sub(1).map(|i| {
            let ts = rows[i].sample.timestamp;
            // Earliest sample sharing that timestamp
            let first = rows.partition_point(|r| r.sample.timestamp < ts);
            (first, cursor - ts)
        });

        match (prev, next) {
            (Some(p), Some(n)) => Some(if p.1 <= n.1 { p } else { n }),
            (Some(p), None) => Some(p),
            (None, Some(n)) => Some(n),
            (None, None) => None,
        }
    }

    /// Build a label for `panel` at the cursor, or `None` when no sample is
    /// within [`HOVER_TOLERANCE`]
    pub fn lookup(&self, panel: Panel, cursor_x: f64, cursor_y: f64, bounds: &AxisBounds) -> Option<HoverLabel> {
        let cursor = x_to_time(cursor_x)?;
        let (index, distance) = self.nearest(cursor)?;
        if distance > HOVER_TOLERANCE {
            return None;
        }

        let row = self.series.get(index)?;
        let (text, value) = format_label(panel, row);
        let anchor = [time_to_x(row.sample.timestamp), value.unwrap_or(cursor_y)];

        let (x_rel, y_rel) = bounds.relative(cursor_x, cursor_y);
        Some(HoverLabel {
            index,
            text,
            anchor,
            placement: TooltipPlacement::from_relative(x_rel, y_rel),
        })
    }
}

/// Label text for one row, plus the y value the label points at
pub fn format_label(panel: Panel, row: &AugmentedSample) -> (String, Option<f64>) {
    let sample = &row.sample;
    let time = format!("Time: {}", sample.timestamp.format(TIMESTAMP_FORMAT));
    match panel {
        Panel::Temperature => (
            format!("{}\nIndoor Temp: {:.1}°C", time, sample.temperature),
            Some(sample.temperature),
        ),
        Panel::Humidity => match sample.humidity {
            Some(h) => (format!("{}\nHumidity: {:.1}%RH", time, h), Some(h)),
            None => (format!("{}\nHumidity: N/A", time), None),
        },
        Panel::Pressure => (
            format!("{}\nIndoor Pressure: {:.1}hPa", time, sample.pressure),
            Some(sample.pressure),
        ),
        Panel::FeelsLike => (
            format!(
                "{}\nFeels Like: {:.1}°C\nActual: {:.1}°C",
                time, row.feels_like, sample.temperature
            ),
            Some(row.feels_like),
        ),
    }
}

/// Holds the label currently shown, if any. Clearing is independent of
/// producing a new label so a stale tooltip can be hidden immediately.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
    current: Option<(Panel, HoverLabel)>,
}

impl HoverState {
    pub fn show(&mut self, panel: Panel, label: HoverLabel) {
        self.current = Some((panel, label));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Apply one frame's lookup result for `panel` and return the label to
    /// draw there. A miss only clears the label if `panel` owns it.
    pub fn update(&mut self, panel: Panel, label: Option<HoverLabel>) -> Option<&HoverLabel> {
        match label {
            Some(label) => self.show(panel, label),
            None => {
                if self.for_panel(panel).is_some() {
                    self.clear();
                }
            }
        }
        self.for_panel(panel)
    }

    pub fn current(&self) -> Option<&HoverLabel> {
        self.current.as_ref().map(|(_, label)| label)
    }

    /// Label for `panel`, if the shown label belongs to it
    pub fn for_panel(&self, panel: Panel) -> Option<&HoverLabel> {
        self.current
            .as_ref()
            .filter(|(p, _)| *p == panel)
            .map(|(_, label)| label)
    }
}
