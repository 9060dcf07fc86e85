//! Main application state and the eframe::App implementation.

use chrono::NaiveDate;
use eframe::egui;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crate::download::{spawn_download, DownloadEvent, DownloadSummary};
use crate::export::export_to_path;
use crate::hover::HoverState;
use crate::pipeline::{prepare_export, prepare_plot, PlotContext};
use crate::remote::{ConnectionRequest, FtpSource};
use crate::settings::UserSettings;
use crate::state::{DownloadState, ToastType};
use crate::store::{format_date_key, SeriesStore};

/// Main application state
pub struct EnvPlotApp {
    /// Persisted connection and view preferences
    pub(crate) settings: UserSettings,
    /// Entered each session, never saved
    pub(crate) password: String,
    /// Raw daily files from the last successful download
    pub(crate) store: SeriesStore,
    /// Events from the download thread while one is running
    download_receiver: Option<Receiver<DownloadEvent>>,
    pub(crate) download_state: DownloadState,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) end_date: Option<NaiveDate>,
    /// Data behind the chart currently on screen
    pub(crate) plot: Option<PlotContext>,
    pub(crate) hover: HoverState,
    /// Single-line status shown at the bottom of the window
    pub(crate) status: String,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,
}

impl Default for EnvPlotApp {
    fn default() -> Self {
        Self::with_settings(UserSettings::default())
    }
}

impl EnvPlotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = UserSettings::load();
        tracing::info!("Loaded settings for host {}", settings.host);
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: UserSettings) -> Self {
        Self {
            settings,
            password: String::new(),
            store: SeriesStore::new(),
            download_receiver: None,
            download_state: DownloadState::Idle,
            start_date: None,
            end_date: None,
            plot: None,
            hover: HoverState::default(),
            status: "Ready".to_string(),
            toast_message: None,
        }
    }

    /// Show a toast message
    pub(crate) fn show_toast(&mut self, message: impl Into<String>, toast_type: ToastType) {
        self.toast_message = Some((message.into(), Instant::now(), toast_type));
    }

    pub(crate) fn save_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn is_downloading(&self) -> bool {
        self.download_receiver.is_some()
    }

    // ========================================================================
    // Download
    // ========================================================================

    /// Start downloading every station file in the background
    pub(crate) fn start_download(&mut self) {
        if self.is_downloading() {
            self.show_toast("A download is already in progress", ToastType::Warning);
            return;
        }

        let request = ConnectionRequest {
            host: self.settings.host.trim().to_string(),
            username: self.settings.username.trim().to_string(),
            password: self.password.clone(),
            directory: self.settings.directory.trim().to_string(),
        };

        if request.host.is_empty() {
            self.show_toast("Enter the FTP server address", ToastType::Warning);
            return;
        }

        tracing::info!("Starting download from {}", request.host);
        self.download_state = DownloadState::Running {
            percent: 0,
            message: "Connecting to FTP server...".to_string(),
        };
        self.download_receiver = Some(spawn_download(FtpSource::new(), request));
    }

    /// Drain pending events from the download thread
    fn check_download_progress(&mut self) {
        loop {
            let Some(receiver) = &self.download_receiver else {
                return;
            };
            match receiver.try_recv() {
                Ok(event) => self.apply_download_event(event),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    if self.download_state.is_running() {
                        self.apply_download_event(DownloadEvent::Failed(
                            "Download stopped unexpectedly".to_string(),
                        ));
                    }
                    self.download_receiver = None;
                    return;
                }
            }
        }
    }

    pub(crate) fn apply_download_event(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Progress { percent, message } => {
                self.status = message.clone();
                self.download_state = DownloadState::Running { percent, message };
            }
            DownloadEvent::Complete(summary) => {
                self.download_receiver = None;
                self.download_state = DownloadState::Idle;
                self.finish_download(*summary);
            }
            DownloadEvent::Failed(message) => {
                self.download_receiver = None;
                self.download_state = DownloadState::Idle;
                self.status = message.clone();
                self.show_toast(message, ToastType::Error);
            }
        }
    }

    fn finish_download(&mut self, summary: DownloadSummary) {
        let DownloadSummary {
            store,
            indoor_files,
            outdoor_files,
            failed_files,
        } = summary;

        self.store = store;
        self.plot = None;
        self.hover.clear();

        let dates = self.store.available_dates();
        self.start_date = dates.first().copied();
        self.end_date = dates.last().copied();

        self.status = format!(
            "Downloaded {} indoor and {} outdoor files",
            indoor_files, outdoor_files
        );
        if failed_files.is_empty() {
            self.show_toast(self.status.clone(), ToastType::Success);
        } else {
            self.show_toast(
                format!("{} ({} could not be downloaded)", self.status, failed_files.len()),
                ToastType::Warning,
            );
        }

        self.save_settings();
    }

    // ========================================================================
    // Plot and export
    // ========================================================================

    fn selected_range(&mut self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => {
                self.show_toast("Download data first", ToastType::Warning);
                None
            }
        }
    }

    /// Build a fresh chart for the selected range and smoothing
    pub(crate) fn generate_plot(&mut self) {
        let Some((start, end)) = self.selected_range() else {
            return;
        };
        let window = self.settings.smoothing_level.window();
        let method = self.settings.smoothing_method;

        // The old tooltip belongs to the old series
        self.hover.clear();

        match prepare_plot(&self.store, start, end, window, method) {
            Ok(context) => {
                self.status = format!(
                    "Showing {} to {} ({} samples)",
                    format_date_key(start),
                    format_date_key(end),
                    context.indoor.len()
                );
                if context.skipped_lines > 0 {
                    self.show_toast(
                        format!("{} malformed lines were skipped", context.skipped_lines),
                        ToastType::Info,
                    );
                }
                self.plot = Some(context);
            }
            Err(e) => {
                self.plot = None;
                self.status = e.to_string();
                self.show_toast(e.to_string(), ToastType::Warning);
            }
        }
    }

    /// Ask for a destination and write the selected range as CSV
    pub(crate) fn export_data(&mut self) {
        let Some((start, end)) = self.selected_range() else {
            return;
        };

        let context = match prepare_export(&self.store, start, end) {
            Ok(context) => context,
            Err(e) => {
                self.show_toast(e.to_string(), ToastType::Warning);
                return;
            }
        };

        let default_name = format!(
            "weather_data_{}_{}.csv",
            start.format("%Y%m%d"),
            end.format("%Y%m%d")
        );
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        match export_to_path(&context, &path) {
            Ok(rows) => {
                self.status = format!("Exported {} rows to {}", rows, path.display());
                self.show_toast("Data exported successfully", ToastType::Success);
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.show_toast(e.to_string(), ToastType::Error);
            }
        }
    }
}

impl eframe::App for EnvPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_download_progress();
        if self.is_downloading() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.render_connection_panel(ui);
            ui.separator();
            self.render_plot_controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
        });

        self.render_toast(ctx);
    }
}
