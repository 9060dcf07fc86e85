//! Chart rendering: one egui_plot per panel with a hover tooltip.

use eframe::egui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Text};
use std::ops::RangeInclusive;

use crate::app::EnvPlotApp;
use crate::hover::{x_to_time, AxisBounds, HoverContext, HoverLabel, HoverState, VerticalSide};
use crate::panels::{downsample_lttb, panel_lines, pressure_axis_range, Panel, MAX_CHART_POINTS};
use crate::pipeline::PlotContext;
use crate::state::{line_color, line_width, GRID_SIZE};

/// Vertical space taken by a panel title
const TITLE_HEIGHT: f32 = 22.0;

impl EnvPlotApp {
    /// Render the chart area for the current view mode
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        let Some(plot) = &self.plot else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Download data, pick a date range and click Generate Plot")
                        .size(18.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        };

        let hover = &mut self.hover;
        let panels = self.settings.view_mode.panels();

        if panels.len() == 1 {
            let height = ui.available_height() - TITLE_HEIGHT;
            render_panel(ui, panels[0], plot, hover, height);
            return;
        }

        let spacing = ui.spacing().item_spacing.y;
        let rows = panels.len().div_ceil(GRID_SIZE);
        let height = (ui.available_height() - spacing * rows as f32) / rows as f32 - TITLE_HEIGHT;

        for row in panels.chunks(GRID_SIZE) {
            ui.columns(GRID_SIZE, |columns| {
                for (column, panel) in columns.iter_mut().zip(row) {
                    render_panel(column, *panel, plot, hover, height);
                }
            });
        }
    }
}

fn format_time_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    x_to_time(mark.value)
        .map(|t| t.format("%d/%m %H:%M").to_string())
        .unwrap_or_default()
}

fn render_panel(ui: &mut egui::Ui, panel: Panel, context: &PlotContext, hover: &mut HoverState, height: f32) {
    ui.label(egui::RichText::new(panel.title()).strong());

    let lines = panel_lines(panel, &context.indoor, context.outdoor.as_ref());
    let lookup = HoverContext::new(&context.indoor);
    let plot_width = ui.available_width();

    let mut plot = Plot::new(panel.plot_id())
        .height(height.max(80.0))
        .legend(Legend::default())
        .x_axis_label("Date/Time")
        .y_axis_label(panel.y_label())
        .x_axis_formatter(format_time_axis)
        .link_axis("envplot_time", [true, false])
        .allow_zoom([true, false])
        .allow_drag([true, false])
        .allow_scroll([true, false]);

    if panel == Panel::Pressure {
        if let Some((lo, hi)) = pressure_axis_range(&context.indoor, context.outdoor.as_ref()) {
            plot = plot.include_y(lo).include_y(hi);
        }
    }

    plot.show(ui, |plot_ui| {
        for line in &lines {
            let [r, g, b] = line_color(line.role);
            for segment in &line.segments {
                let points: PlotPoints = downsample_lttb(segment, MAX_CHART_POINTS).into_iter().collect();
                plot_ui.line(
                    Line::new(line.role.name(), points)
                        .color(egui::Color32::from_rgb(r, g, b))
                        .width(line_width(line.role)),
                );
            }
        }

        let bounds = plot_ui.plot_bounds();
        let axis = AxisBounds {
            x_min: bounds.min()[0],
            x_max: bounds.max()[0],
            y_min: bounds.min()[1],
            y_max: bounds.max()[1],
        };

        let label = plot_ui
            .pointer_coordinate()
            .and_then(|pos| lookup.lookup(panel, pos.x, pos.y, &axis));

        if let Some(label) = hover.update(panel, label) {
            plot_ui.text(tooltip(label, &axis, plot_width, height));
        }
    });
}

/// Position the label text using the placement's screen offset
fn tooltip(label: &HoverLabel, axis: &AxisBounds, width_px: f32, height_px: f32) -> Text {
    let [dx, dy] = label.placement.offset_points();
    let per_px_x = (axis.x_max - axis.x_min) / f64::from(width_px.max(1.0));
    let per_px_y = (axis.y_max - axis.y_min) / f64::from(height_px.max(1.0));
    let position = PlotPoint::new(
        label.anchor[0] + f64::from(dx) * per_px_x,
        label.anchor[1] + f64::from(dy) * per_px_y,
    );

    let anchor = match label.placement.vertical {
        VerticalSide::Above => egui::Align2::LEFT_BOTTOM,
        VerticalSide::Below => egui::Align2::LEFT_TOP,
    };

    Text::new(
        "",
        position,
        egui::RichText::new(&label.text)
            .size(12.0)
            .background_color(egui::Color32::from_rgba_unmultiplied(255, 255, 224, 230))
            .color(egui::Color32::BLACK),
    )
    .anchor(anchor)
}
