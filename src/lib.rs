//! EnvPlot - A viewer for daily weather-station CSV logs written in Rust
//!
//! This library downloads a station's daily indoor and outdoor CSV files over
//! FTP, parses and smooths them, and renders temperature, humidity, pressure
//! and feels-like charts with an interactive hover readout.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Station record parsing into time-ordered series
//! - [`store`] - Date-keyed cache of downloaded files and range selection
//! - [`analysis`] - Smoothing filters and the heat index
//! - [`hover`] - Nearest-sample lookup and tooltip placement
//! - [`panels`] - Chart panels, line building and downsampling
//! - [`pipeline`] - Selection → smoothing → derivation for plot and export
//! - [`remote`] - Remote file sources (FTP)
//! - [`download`] - Background download worker
//! - [`export`] - CSV export
//! - [`settings`] - User settings persistence
//! - [`state`] - Shared UI state types and constants
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components

pub mod analysis;
pub mod app;
pub mod download;
pub mod export;
pub mod hover;
pub mod panels;
pub mod parsers;
pub mod pipeline;
pub mod remote;
pub mod settings;
pub mod state;
pub mod store;
pub mod ui;
