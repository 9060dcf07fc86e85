//! Connection form, plot controls and the status bar.

use chrono::NaiveDate;
use eframe::egui;
use strum::IntoEnumIterator;

use crate::analysis::{SmoothingLevel, SmoothingMethod};
use crate::app::EnvPlotApp;
use crate::panels::{Panel, ViewMode};
use crate::state::DownloadState;
use crate::store::format_date_key;

impl EnvPlotApp {
    /// Render the FTP connection form and the download button
    pub fn render_connection_panel(&mut self, ui: &mut egui::Ui) {
        let downloading = self.is_downloading();

        ui.horizontal(|ui| {
            ui.label("Host:");
            ui.add(egui::TextEdit::singleline(&mut self.settings.host).desired_width(140.0));
            ui.label("Username:");
            ui.add(egui::TextEdit::singleline(&mut self.settings.username).desired_width(100.0));
            ui.label("Password:");
            ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .password(true)
                    .desired_width(100.0),
            );
            ui.label("Directory:");
            ui.add(egui::TextEdit::singleline(&mut self.settings.directory).desired_width(140.0));

            let button = ui.add_enabled(!downloading, egui::Button::new("Connect & Download"));
            if button.clicked() {
                self.start_download();
            }
        });

        if let DownloadState::Running { percent, message } = &self.download_state {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.add(
                    egui::ProgressBar::new(f32::from(*percent) / 100.0)
                        .text(message.as_str())
                        .desired_width(ui.available_width()),
                );
            });
        }
    }

    /// Render range, smoothing and view selectors plus the action buttons
    pub fn render_plot_controls(&mut self, ui: &mut egui::Ui) {
        let dates: Vec<NaiveDate> = self.store.available_dates().to_vec();
        let has_data = !dates.is_empty();
        let mut preferences_changed = false;
        let mut generate = false;
        let mut export = false;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(has_data, |ui| {
                ui.label("Start Date:");
                date_combo(ui, "start_date", &mut self.start_date, &dates);
                ui.label("End Date:");
                date_combo(ui, "end_date", &mut self.end_date, &dates);
            });

            ui.separator();

            ui.label("Smoothing:");
            egui::ComboBox::from_id_salt("smoothing_level")
                .selected_text(self.settings.smoothing_level.to_string())
                .show_ui(ui, |ui| {
                    for level in SmoothingLevel::iter() {
                        preferences_changed |= ui
                            .selectable_value(&mut self.settings.smoothing_level, level, level.to_string())
                            .changed();
                    }
                });

            ui.label("Method:");
            egui::ComboBox::from_id_salt("smoothing_method")
                .selected_text(self.settings.smoothing_method.label())
                .show_ui(ui, |ui| {
                    for method in SmoothingMethod::iter() {
                        preferences_changed |= ui
                            .selectable_value(&mut self.settings.smoothing_method, method, method.label())
                            .changed();
                    }
                });

            ui.label("View:");
            egui::ComboBox::from_id_salt("view_mode")
                .selected_text(self.settings.view_mode.label())
                .show_ui(ui, |ui| {
                    let modes = std::iter::once(ViewMode::All).chain(Panel::iter().map(ViewMode::Single));
                    for mode in modes {
                        preferences_changed |= ui
                            .selectable_value(&mut self.settings.view_mode, mode, mode.label())
                            .changed();
                    }
                });

            ui.separator();

            ui.add_enabled_ui(has_data, |ui| {
                generate = ui.button("Generate Plot").clicked();
                export = ui.button("Export Data").clicked();
            });
        });

        if preferences_changed {
            self.save_settings();
            self.hover.clear();
        }
        if generate {
            self.generate_plot();
        }
        if export {
            self.export_data();
        }
    }

    /// Render the single-line status bar
    pub fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&self.status).small());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.store.is_empty() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} indoor / {} outdoor days",
                            self.store.indoor_count(),
                            self.store.outdoor_count()
                        ))
                        .small()
                        .color(egui::Color32::GRAY),
                    );
                }
            });
        });
    }
}

fn date_combo(ui: &mut egui::Ui, id: &str, selected: &mut Option<NaiveDate>, dates: &[NaiveDate]) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.map(format_date_key).unwrap_or_else(|| "-".to_string()))
        .show_ui(ui, |ui| {
            for date in dates {
                ui.selectable_value(selected, Some(*date), format_date_key(*date));
            }
        });
}
