//! Control Panel Widget
//! Left side panel with the plot form and the four action buttons.

use egui::{Color32, ComboBox, RichText};

use crate::charts::ChartKind;
use crate::data::PlotRequest;

/// The editable form fields. Ephemeral: only snapshotted into a
/// [`PlotRequest`] when Generate is pressed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotForm {
    pub kind: ChartKind,
    pub x_raw: String,
    pub y_raw: String,
    pub color_raw: String,
    pub show_grid: bool,
}

impl PlotForm {
    /// Back to defaults: Line, empty fields, grid off.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot the current field values.
    pub fn to_request(&self) -> PlotRequest {
        PlotRequest {
            kind: self.kind,
            x_raw: self.x_raw.clone(),
            y_raw: self.y_raw.clone(),
            color_raw: self.color_raw.clone(),
            show_grid: self.show_grid,
        }
    }
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    Generate,
    ClearAll,
    ViewHistory,
    ExportPdf,
}

/// Left side control panel with the input form and action buttons.
#[derive(Default)]
pub struct ControlPanel {
    pub form: PlotForm,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the panel. Returns at most one action per frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 PlotDesk")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Advanced Plotting")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Plot Controls =====
        ui.label(RichText::new("🛠 Plot Controls").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let field_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Plot Type:"));
            ComboBox::from_id_salt("plot_type")
                .width(field_width)
                .selected_text(self.form.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut self.form.kind, kind, kind.label());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X Values:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.form.x_raw).hint_text("1,2,3,4"),
            );
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Y Values:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.form.y_raw).hint_text("5,6,7,8"),
            );
        });

        ui.add_space(5.0);
        ui.label(
            RichText::new("* Use commas to separate values (e.g., \"1,2,3,4\")")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Plot Color:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.form.color_raw).hint_text("blue"),
            );
        });

        ui.add_space(5.0);
        ui.checkbox(&mut self.form.show_grid, "Show Grid");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let generate = egui::Button::new(RichText::new("▶ Generate Plot").size(15.0))
                .min_size(egui::vec2(180.0, 32.0));
            if ui.add(generate).clicked() {
                action = ControlPanelAction::Generate;
            }

            ui.add_space(8.0);

            let clear = egui::Button::new("Clear All").min_size(egui::vec2(180.0, 26.0));
            if ui.add(clear).clicked() {
                action = ControlPanelAction::ClearAll;
            }

            ui.add_space(8.0);

            let history =
                egui::Button::new("View Plot History").min_size(egui::vec2(180.0, 26.0));
            if ui.add(history).clicked() {
                action = ControlPanelAction::ViewHistory;
            }

            ui.add_space(8.0);

            let export = egui::Button::new("💾 Save as PDF").min_size(egui::vec2(180.0, 26.0));
            if ui.add(export).clicked() {
                action = ControlPanelAction::ExportPdf;
            }
        });

        action
    }
}
