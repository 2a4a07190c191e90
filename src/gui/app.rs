//! PlotDesk Main Application
//! Main window wiring the input form, chart surface, history log, dialogs,
//! and PDF export together.

use std::path::PathBuf;

use egui::{Align2, Color32, RichText, SidePanel};
use tracing::{info, warn};

use crate::charts::StaticChartRenderer;
use crate::data::{HistoryEntry, PlotHistory};
use crate::gui::{ChartView, ControlPanel, ControlPanelAction};

const PROJECT_URL: &str = "https://github.com/plotdesk/plotdesk";

/// Main application window and all of its state. Everything runs on the UI
/// thread; each action handler runs to completion within one frame.
pub struct PlotDeskApp {
    control_panel: ControlPanel,
    chart_view: ChartView,
    history: PlotHistory,

    // Dialog state
    error_message: Option<String>,
    show_history: bool,
    export_notice: Option<PathBuf>,
}

impl PlotDeskApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_view: ChartView::new(),
            history: PlotHistory::new(),
            error_message: None,
            show_history: false,
            export_notice: None,
        }
    }

    /// Generate: validate the form, replace the surface, append to history.
    /// On any validation error the surface and history stay untouched.
    fn handle_generate(&mut self) {
        let request = self.control_panel.form.to_request();
        match request.resolve() {
            Ok(spec) => {
                info!(kind = spec.kind.label(), points = spec.xs.len(), "plot generated");
                self.history.record(HistoryEntry {
                    kind: spec.kind,
                    x_raw: request.x_raw,
                    y_raw: request.y_raw,
                    color: spec.color_name.clone(),
                    show_grid: request.show_grid,
                });
                self.chart_view.set_spec(spec);
            }
            Err(err) => {
                warn!(error = %err, "plot request rejected");
                self.error_message = Some(err.to_string());
            }
        }
    }

    /// Clear: form and surface back to their defaults. History is kept.
    fn handle_clear(&mut self) {
        self.control_panel.form.reset();
        self.chart_view.clear();
    }

    /// Save as PDF: ask for a path, then serialize the current surface.
    /// Canceling the dialog is a no-op.
    fn handle_export_pdf(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF Documents", &["pdf"])
            .set_file_name("plot.pdf")
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::export_pdf(self.chart_view.spec(), &path) {
            Ok(()) => {
                info!(path = %path.display(), "chart exported");
                self.export_notice = Some(path);
            }
            Err(err) => {
                warn!(error = %err, "chart export failed");
                self.error_message = Some(format!("Failed to save plot as PDF: {err}"));
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            self.error_message = None;
                        }
                    });
                });
        }

        if self.show_history {
            let mut open = true;
            egui::Window::new("Plot History")
                .open(&mut open)
                .default_width(460.0)
                .vscroll(true)
                .show(ctx, |ui| {
                    ui.label(RichText::new(self.history.summary()).monospace());
                });
            self.show_history = open;
        }

        if let Some(path) = self.export_notice.clone() {
            egui::Window::new("Save as PDF")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("Plot saved successfully as {}", path.display()));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Open").clicked() {
                            if let Err(err) = open::that(&path) {
                                warn!(error = %err, "could not open exported file");
                            }
                        }
                        if ui.button("OK").clicked() {
                            self.export_notice = None;
                        }
                    });
                });
        }
    }
}

impl eframe::App for PlotDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - input form and actions
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Generate => self.handle_generate(),
                        ControlPanelAction::ClearAll => self.handle_clear(),
                        ControlPanelAction::ViewHistory => self.show_history = true,
                        ControlPanelAction::ExportPdf => self.handle_export_pdf(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Footer - copyright and project link
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("© 2025 PlotDesk Contributors")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.label(RichText::new("Powered by").size(11.0).color(Color32::GRAY));
                ui.hyperlink_to(RichText::new("PlotDesk").size(11.0), PROJECT_URL);
            });
        });

        // Central panel - chart surface
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.show(ui);
        });

        self.show_dialogs(ctx);
    }
}
