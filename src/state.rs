//! Application state types and constants shared by the UI modules.

use crate::panels::LineRole;

// ============================================================================
// Constants
// ============================================================================

/// How long a toast stays on screen, in seconds
pub const TOAST_DURATION_SECS: u64 = 3;

/// Rows (and columns) of the all-panels grid
pub const GRID_SIZE: usize = 2;

/// Line colors, keyed by role
pub fn line_color(role: LineRole) -> [u8; 3] {
    match role {
        LineRole::IndoorTemperature => [191, 78, 48], // Rust orange
        LineRole::OutdoorTemperature => [71, 108, 155], // Blue
        LineRole::IndoorHumidity => [0, 158, 115],    // Bluish green
        LineRole::IndoorPressure => [113, 120, 78],   // Olive green
        LineRole::OutdoorPressure => [204, 121, 167], // Reddish purple
        LineRole::FeelsLike => [213, 94, 0],          // Vermillion
        LineRole::ActualTemperature => [153, 153, 153], // Gray
    }
}

/// Line widths, keyed by role
pub fn line_width(role: LineRole) -> f32 {
    match role {
        LineRole::ActualTemperature => 1.0,
        _ => 1.5,
    }
}

// ============================================================================
// Core Types
// ============================================================================

/// Current state of the background download
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DownloadState {
    /// No download in progress
    #[default]
    Idle,
    /// Download running; last reported progress and message
    Running { percent: u8, message: String },
}

impl DownloadState {
    pub fn is_running(&self) -> bool {
        matches!(self, DownloadState::Running { .. })
    }
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],    // Blue
            ToastType::Success => [113, 120, 78], // Olive green
            ToastType::Warning => [253, 193, 73], // Amber
            ToastType::Error => [135, 30, 28],    // Dark red
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],               // White text for other backgrounds
        }
    }
}
