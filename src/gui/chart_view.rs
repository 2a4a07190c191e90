//! Chart View Widget
//! The central chart surface: holds the currently rendered plot and redraws
//! it every frame, with the hexbin color-scale legend beside it.

use egui::{Color32, RichText};

use crate::charts::{ChartKind, ChartPlotter, PlotSpec};
use crate::stats::{self, HEXBIN_GRIDSIZE};

/// The persistent chart surface. Fully replaced on every Generate, emptied
/// by Clear.
#[derive(Default)]
pub struct ChartView {
    spec: Option<PlotSpec>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the surface with a freshly validated plot.
    pub fn set_spec(&mut self, spec: PlotSpec) {
        self.spec = Some(spec);
    }

    /// Empty the surface.
    pub fn clear(&mut self) {
        self.spec = None;
    }

    pub fn spec(&self) -> Option<&PlotSpec> {
        self.spec.as_ref()
    }

    /// Draw the surface, or the empty-state hint when nothing has been
    /// generated yet.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(spec) = &self.spec else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No plot yet. Enter values and press Generate Plot.")
                        .size(16.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        };

        if spec.kind == ChartKind::Hexbin {
            let grid = stats::HexBinGrid::compute(&spec.xs, &spec.ys, HEXBIN_GRIDSIZE);
            ui.horizontal(|ui| {
                let legend_width = 70.0;
                ui.vertical(|ui| {
                    ui.set_width(ui.available_width() - legend_width);
                    ChartPlotter::show(ui, spec);
                });
                Self::draw_colorbar_legend(ui, grid.max_count);
            });
        } else {
            ChartPlotter::show(ui, spec);
        }
    }

    /// Painter-drawn vertical color ramp with count labels, highest at the
    /// top to match the exported document.
    fn draw_colorbar_legend(ui: &mut egui::Ui, max_count: usize) {
        ui.vertical(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new("Counts").size(12.0));

            let bar_size = egui::vec2(16.0, 180.0);
            let (rect, _) = ui.allocate_exact_size(bar_size, egui::Sense::hover());
            let painter = ui.painter();
            let steps = 48;
            let step_h = rect.height() / steps as f32;
            for s in 0..steps {
                let t = 1.0 - s as f64 / (steps - 1) as f64;
                let y0 = rect.top() + s as f32 * step_h;
                painter.rect_filled(
                    egui::Rect::from_min_size(
                        egui::pos2(rect.left(), y0),
                        egui::vec2(rect.width(), step_h + 0.5),
                    ),
                    0.0,
                    stats::blues_ramp(t),
                );
            }

            ui.label(RichText::new(format!("max {}", max_count)).size(11.0));
            ui.label(RichText::new("min 0").size(11.0));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> PlotSpec {
        PlotSpec {
            kind: ChartKind::Line,
            xs: vec![1.0, 2.0],
            ys: vec![3.0, 4.0],
            color: Color32::BLUE,
            color_name: "blue".to_string(),
            show_grid: false,
        }
    }

    #[test]
    fn surface_is_replaced_and_cleared() {
        let mut view = ChartView::new();
        assert!(view.spec().is_none());

        view.set_spec(sample_spec());
        assert_eq!(view.spec().unwrap().kind, ChartKind::Line);

        let mut replacement = sample_spec();
        replacement.kind = ChartKind::Pie;
        view.set_spec(replacement);
        assert_eq!(view.spec().unwrap().kind, ChartKind::Pie);

        view.clear();
        assert!(view.spec().is_none());
    }
}
