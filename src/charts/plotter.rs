//! Chart Plotter Module
//! Draws the current plot spec onto the interactive surface using egui_plot.

use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::error::{PlotError, Result};
use crate::stats::{self, HEXBIN_GRIDSIZE, HISTOGRAM_BINS};

/// Fixed chart title and axis labels.
pub const CHART_TITLE: &str = "Plot Title";
pub const X_AXIS_LABEL: &str = "X-axis";
pub const Y_AXIS_LABEL: &str = "Y-axis";

/// The nine supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Scatter,
    Bar,
    Histogram,
    Pie,
    Area,
    Box,
    Hexbin,
    StackedBar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Bar,
        ChartKind::Histogram,
        ChartKind::Pie,
        ChartKind::Area,
        ChartKind::Box,
        ChartKind::Hexbin,
        ChartKind::StackedBar,
    ];

    /// The label shown in the selector and recorded in history.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Scatter => "Scatter",
            ChartKind::Bar => "Bar",
            ChartKind::Histogram => "Histogram",
            ChartKind::Pie => "Pie",
            ChartKind::Area => "Area",
            ChartKind::Box => "Box",
            ChartKind::Hexbin => "Hexbin",
            ChartKind::StackedBar => "Stacked Bar",
        }
    }

    /// Resolve a label by exact match. Anything else is an error rather than
    /// a silent no-op.
    pub fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| PlotError::UnknownPlotType(label.to_string()))
    }
}

/// A validated, render-ready plot: the single source both the interactive
/// surface and the PDF exporter draw from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub kind: ChartKind,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: Color32,
    /// Effective color name as recorded in history ("blue" when the field
    /// was empty).
    pub color_name: String,
    pub show_grid: bool,
}

/// Draws a [`PlotSpec`] with egui_plot primitives.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Render the plot into the available space: centered title above the
    /// surface, then one egui_plot `Plot` with the kind-specific geometry.
    pub fn show(ui: &mut egui::Ui, spec: &PlotSpec) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(CHART_TITLE).strong().size(16.0));
        });

        let background = ui.visuals().extreme_bg_color;

        let mut plot = Plot::new("chart_surface")
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            .show_grid(spec.show_grid)
            .allow_scroll(false);

        if matches!(spec.kind, ChartKind::Pie) {
            plot = plot.data_aspect(1.0).include_x(-1.4).include_x(1.4);
        }

        plot.show(ui, |plot_ui| match spec.kind {
            ChartKind::Line => {
                plot_ui.line(Line::new(points_of(spec)).color(spec.color).width(2.0));
            }
            ChartKind::Scatter => {
                plot_ui.points(
                    Points::new(points_of(spec))
                        .radius(3.5)
                        .filled(true)
                        .color(spec.color),
                );
            }
            ChartKind::Bar => {
                let bars: Vec<Bar> = spec
                    .xs
                    .iter()
                    .zip(&spec.ys)
                    .map(|(&x, &y)| Bar::new(x, y).width(0.8).fill(spec.color))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            }
            ChartKind::Histogram => {
                let bins = stats::histogram(&spec.ys, HISTOGRAM_BINS);
                let bars: Vec<Bar> = bins
                    .iter()
                    .map(|bin| {
                        Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                            .width(bin.end - bin.start)
                            .fill(spec.color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            }
            ChartKind::Pie => Self::draw_pie(plot_ui, spec, background),
            ChartKind::Area => {
                // Filled region between the polyline and y = 0, matching a
                // 60% opacity fill, with no outline of its own.
                let mut vertices: Vec<[f64; 2]> = Vec::with_capacity(spec.xs.len() + 2);
                if let (Some(&first), Some(&last)) = (spec.xs.first(), spec.xs.last()) {
                    vertices.push([first, 0.0]);
                    vertices.extend(spec.xs.iter().zip(&spec.ys).map(|(&x, &y)| [x, y]));
                    vertices.push([last, 0.0]);
                }
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(vertices))
                        .fill_color(with_alpha(spec.color, 153))
                        .stroke(Stroke::NONE),
                );
            }
            ChartKind::Box => {
                if let Some(box_stats) = stats::BoxStats::compute(&spec.ys) {
                    let elem = BoxElem::new(
                        1.0,
                        BoxSpread::new(
                            box_stats.whisker_low,
                            box_stats.q1,
                            box_stats.median,
                            box_stats.q3,
                            box_stats.whisker_high,
                        ),
                    )
                    .box_width(0.5)
                    .fill(with_alpha(spec.color, 180))
                    .stroke(Stroke::new(1.5, spec.color));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]));
                }
            }
            ChartKind::Hexbin => {
                let grid = stats::HexBinGrid::compute(&spec.xs, &spec.ys, HEXBIN_GRIDSIZE);
                for cell in &grid.cells {
                    let t = cell.count as f64 / grid.max_count.max(1) as f64;
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(hex_vertices(
                            cell.cx, cell.cy, grid.sx, grid.sy,
                        )))
                        .fill_color(stats::blues_ramp(t))
                        .stroke(Stroke::NONE),
                    );
                }
            }
            ChartKind::StackedBar => {
                let bars: Vec<Bar> = stats::stack_segments(&spec.xs, &spec.ys)
                    .iter()
                    .enumerate()
                    .map(|(i, seg)| {
                        // Alternate shades keep segments of one stack apart.
                        let fill = if i % 2 == 0 {
                            spec.color
                        } else {
                            spec.color.gamma_multiply(0.7)
                        };
                        Bar::new(seg.x, seg.y1 - seg.y0)
                            .base_offset(seg.y0)
                            .width(0.8)
                            .fill(fill)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            }
        });
    }

    /// Pie slices as polygon fans around the origin, slice labels outside the
    /// rim and percentage labels inside, starting at 12 o'clock and running
    /// counterclockwise.
    fn draw_pie(plot_ui: &mut egui_plot::PlotUi, spec: &PlotSpec, background: Color32) {
        let slices = stats::pie_slices(&spec.ys);
        let luminance =
            spec.color.r() as u32 * 3 + spec.color.g() as u32 * 6 + spec.color.b() as u32;
        let text_color = if luminance > 1280 {
            Color32::BLACK
        } else {
            Color32::WHITE
        };

        for slice in &slices {
            if slice.fraction <= 0.0 {
                continue;
            }
            let steps = ((slice.end_angle - slice.start_angle).to_degrees() / 4.0).ceil() as usize;
            let steps = steps.max(2);
            let mut vertices = vec![[0.0, 0.0]];
            for s in 0..=steps {
                let angle = slice.start_angle
                    + (slice.end_angle - slice.start_angle) * s as f64 / steps as f64;
                vertices.push([angle.cos(), angle.sin()]);
            }
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vertices))
                    .fill_color(spec.color)
                    .stroke(Stroke::new(1.5, background)),
            );

            let mid = (slice.start_angle + slice.end_angle) / 2.0;

            if let Some(&label) = spec.xs.get(slice.index) {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                        RichText::new(format_value(label)).size(13.0),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
            }
            plot_ui.text(
                Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .size(12.0)
                        .color(text_color),
                )
                .anchor(Align2::CENTER_CENTER),
            );
        }
    }
}

fn points_of(spec: &PlotSpec) -> PlotPoints {
    spec.xs
        .iter()
        .zip(&spec.ys)
        .map(|(&x, &y)| [x, y])
        .collect()
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Vertices of the pointy-top hexagon tiling cell centered at `(cx, cy)`
/// with lattice spacings `sx`/`sy`.
fn hex_vertices(cx: f64, cy: f64, sx: f64, sy: f64) -> Vec<[f64; 2]> {
    vec![
        [cx, cy + sy / 2.0],
        [cx + sx / 2.0, cy + sy / 4.0],
        [cx + sx / 2.0, cy - sy / 4.0],
        [cx, cy - sy / 2.0],
        [cx - sx / 2.0, cy - sy / 4.0],
        [cx - sx / 2.0, cy + sy / 4.0],
    ]
}

/// Compact display of a numeric label (integers without a decimal point).
pub(crate) fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 && v.abs() < 1e12 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_label(kind.label()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        assert!(matches!(
            ChartKind::from_label("Spline"),
            Err(PlotError::UnknownPlotType(_))
        ));
        // Matching is exact: no case folding, no trimming.
        assert!(ChartKind::from_label("line").is_err());
        assert!(ChartKind::from_label(" Line").is_err());
    }

    #[test]
    fn stacked_bar_label_has_a_space() {
        assert_eq!(ChartKind::StackedBar.label(), "Stacked Bar");
        assert_eq!(
            ChartKind::from_label("Stacked Bar").unwrap(),
            ChartKind::StackedBar
        );
    }

    #[test]
    fn hex_vertices_tile_the_lattice() {
        let hex = hex_vertices(0.0, 0.0, 2.0, 3.0);
        assert_eq!(hex.len(), 6);
        assert_eq!(hex[0], [0.0, 1.5]);
        assert_eq!(hex[3], [0.0, -1.5]);
        assert_eq!(hex[1], [1.0, 0.75]);
    }

    #[test]
    fn format_value_trims_integers() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-1.0), "-1");
    }
}
