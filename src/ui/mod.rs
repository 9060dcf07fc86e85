//! UI rendering modules for the EnvPlot application.
//!
//! - `controls` - Connection form, date/smoothing/view selectors, status bar
//! - `chart` - Panel plots and hover tooltips
//! - `toast` - Toast notification system

pub mod chart;
pub mod controls;
pub mod toast;
