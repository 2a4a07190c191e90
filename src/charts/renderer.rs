//! Static Chart Renderer
//! Draws the current chart surface into a vector PDF page for export.
//!
//! Layout, axes, ticks, and the nine chart geometries are computed in plain
//! code against the page coordinate system; the actual drawing goes through
//! [`PdfCanvas`] so the output is a true vector document.

use std::path::Path;

use egui::Color32;

use crate::charts::plotter::{format_value, CHART_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::charts::{ChartKind, PlotSpec};
use crate::error::Result;
use crate::pdf::{PdfCanvas, PdfDocument, TextAnchor};
use crate::stats::{self, HEXBIN_GRIDSIZE, HISTOGRAM_BINS};

// Page geometry (points, 72 per inch): an 8×6 inch landscape page.
const PAGE_W: f64 = 576.0;
const PAGE_H: f64 = 432.0;
const MARGIN_LEFT: f64 = 66.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 46.0;
const MARGIN_BOTTOM: f64 = 56.0;
/// Extra right margin reserved for the hexbin color-scale bar.
const COLORBAR_GUTTER: f64 = 62.0;

const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
const GRID_GRAY: Color32 = Color32::from_rgb(210, 210, 210);

const MAX_TICKS: usize = 8;

/// Renders a plot spec (or empty axes) into a single-page PDF.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw the surface and write it to `path`.
    pub fn export_pdf(spec: Option<&PlotSpec>, path: &Path) -> Result<()> {
        let canvas = Self::render(spec);
        PdfDocument::save(path, &canvas)?;
        Ok(())
    }

    /// Draw the surface into an in-memory canvas.
    pub fn render(spec: Option<&PlotSpec>) -> PdfCanvas {
        let mut canvas = PdfCanvas::new(PAGE_W, PAGE_H);

        canvas.set_fill_color(WHITE);
        canvas.fill_rect(0.0, 0.0, PAGE_W, PAGE_H);

        let margin_right = match spec.map(|s| s.kind) {
            Some(ChartKind::Hexbin) => MARGIN_RIGHT + COLORBAR_GUTTER,
            _ => MARGIN_RIGHT,
        };
        let plot = PlotRect {
            x: MARGIN_LEFT,
            y: MARGIN_BOTTOM,
            w: PAGE_W - MARGIN_LEFT - margin_right,
            h: PAGE_H - MARGIN_BOTTOM - MARGIN_TOP,
        };

        let (x_range, y_range) = data_ranges(spec);
        let axes = Axes::new(plot, x_range, y_range);

        let show_grid = spec.map(|s| s.show_grid).unwrap_or(false);
        axes.draw_frame(&mut canvas, show_grid);

        canvas.set_fill_color(BLACK);
        canvas.text(
            plot.x + plot.w / 2.0,
            PAGE_H - 30.0,
            16.0,
            CHART_TITLE,
            TextAnchor::Center,
        );
        canvas.text(
            plot.x + plot.w / 2.0,
            14.0,
            11.0,
            X_AXIS_LABEL,
            TextAnchor::Center,
        );
        canvas.text_vertical(18.0, plot.y + plot.h / 2.0, 11.0, Y_AXIS_LABEL);

        if let Some(spec) = spec {
            Self::draw_spec(&mut canvas, &axes, spec);
        }

        canvas
    }

    fn draw_spec(canvas: &mut PdfCanvas, axes: &Axes, spec: &PlotSpec) {
        match spec.kind {
            ChartKind::Line => {
                let points: Vec<(f64, f64)> = spec
                    .xs
                    .iter()
                    .zip(&spec.ys)
                    .map(|(&x, &y)| (axes.to_x(x), axes.to_y(y)))
                    .collect();
                canvas.set_stroke_color(spec.color);
                canvas.set_line_width(1.5);
                canvas.polyline(&points);
            }
            ChartKind::Scatter => {
                canvas.set_fill_color(spec.color);
                for (&x, &y) in spec.xs.iter().zip(&spec.ys) {
                    canvas.fill_circle(axes.to_x(x), axes.to_y(y), 3.0);
                }
            }
            ChartKind::Bar => {
                canvas.set_fill_color(spec.color);
                let half = axes.x_scale() * 0.4;
                for (&x, &y) in spec.xs.iter().zip(&spec.ys) {
                    Self::fill_bar(canvas, axes, x, half, 0.0, y);
                }
            }
            ChartKind::Histogram => {
                canvas.set_fill_color(spec.color);
                for bin in stats::histogram(&spec.ys, HISTOGRAM_BINS) {
                    if bin.count == 0 {
                        continue;
                    }
                    let x0 = axes.to_x(bin.start);
                    let x1 = axes.to_x(bin.end);
                    let y0 = axes.to_y(0.0);
                    let y1 = axes.to_y(bin.count as f64);
                    canvas.fill_rect(x0, y0, x1 - x0, y1 - y0);
                }
            }
            ChartKind::Pie => Self::draw_pie(canvas, axes, spec),
            ChartKind::Area => {
                let fill = alpha_on_white(spec.color, 0.6);
                let mut vertices: Vec<(f64, f64)> = Vec::with_capacity(spec.xs.len() + 2);
                if let (Some(&first), Some(&last)) = (spec.xs.first(), spec.xs.last()) {
                    vertices.push((axes.to_x(first), axes.to_y(0.0)));
                    vertices.extend(
                        spec.xs
                            .iter()
                            .zip(&spec.ys)
                            .map(|(&x, &y)| (axes.to_x(x), axes.to_y(y))),
                    );
                    vertices.push((axes.to_x(last), axes.to_y(0.0)));
                }
                canvas.set_fill_color(fill);
                canvas.fill_polygon(&vertices);
            }
            ChartKind::Box => {
                if let Some(bs) = stats::BoxStats::compute(&spec.ys) {
                    Self::draw_box(canvas, axes, spec.color, &bs);
                }
            }
            ChartKind::Hexbin => {
                let grid = stats::HexBinGrid::compute(&spec.xs, &spec.ys, HEXBIN_GRIDSIZE);
                for cell in &grid.cells {
                    let t = cell.count as f64 / grid.max_count.max(1) as f64;
                    let vertices: Vec<(f64, f64)> = [
                        (cell.cx, cell.cy + grid.sy / 2.0),
                        (cell.cx + grid.sx / 2.0, cell.cy + grid.sy / 4.0),
                        (cell.cx + grid.sx / 2.0, cell.cy - grid.sy / 4.0),
                        (cell.cx, cell.cy - grid.sy / 2.0),
                        (cell.cx - grid.sx / 2.0, cell.cy - grid.sy / 4.0),
                        (cell.cx - grid.sx / 2.0, cell.cy + grid.sy / 4.0),
                    ]
                    .iter()
                    .map(|&(x, y)| (axes.to_x(x), axes.to_y(y)))
                    .collect();
                    canvas.set_fill_color(stats::blues_ramp(t));
                    canvas.fill_polygon(&vertices);
                }
                Self::draw_colorbar(canvas, axes, grid.max_count);
            }
            ChartKind::StackedBar => {
                let half = axes.x_scale() * 0.4;
                for (i, seg) in stats::stack_segments(&spec.xs, &spec.ys).iter().enumerate() {
                    let fill = if i % 2 == 0 {
                        spec.color
                    } else {
                        shade(spec.color, 0.7)
                    };
                    canvas.set_fill_color(fill);
                    Self::fill_bar(canvas, axes, seg.x, half, seg.y0, seg.y1);
                }
            }
        }
    }

    /// One vertical bar spanning `y0..y1` in data space, `half` page units
    /// to either side of `x`.
    fn fill_bar(canvas: &mut PdfCanvas, axes: &Axes, x: f64, half: f64, y0: f64, y1: f64) {
        let px = axes.to_x(x);
        let p0 = axes.to_y(y0.min(y1));
        let p1 = axes.to_y(y0.max(y1));
        canvas.fill_rect(px - half, p0, half * 2.0, p1 - p0);
    }

    fn draw_pie(canvas: &mut PdfCanvas, axes: &Axes, spec: &PlotSpec) {
        let slices = stats::pie_slices(&spec.ys);
        let cx = axes.plot.x + axes.plot.w / 2.0;
        let cy = axes.plot.y + axes.plot.h / 2.0;
        let radius = (axes.plot.w.min(axes.plot.h)) * 0.38;
        let luminance =
            spec.color.r() as u32 * 3 + spec.color.g() as u32 * 6 + spec.color.b() as u32;
        let pct_color = if luminance > 1280 { BLACK } else { WHITE };

        for slice in &slices {
            if slice.fraction <= 0.0 {
                continue;
            }
            let steps = (((slice.end_angle - slice.start_angle).to_degrees() / 4.0).ceil()
                as usize)
                .max(2);
            let mut vertices = vec![(cx, cy)];
            for s in 0..=steps {
                let angle = slice.start_angle
                    + (slice.end_angle - slice.start_angle) * s as f64 / steps as f64;
                vertices.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
            }
            canvas.set_fill_color(spec.color);
            canvas.fill_polygon(&vertices);
            canvas.set_stroke_color(WHITE);
            canvas.set_line_width(1.0);
            canvas.stroke_polygon(&vertices);

            let mid = (slice.start_angle + slice.end_angle) / 2.0;
            if let Some(&label) = spec.xs.get(slice.index) {
                canvas.set_fill_color(BLACK);
                canvas.text(
                    cx + radius * 1.15 * mid.cos(),
                    cy + radius * 1.15 * mid.sin() - 3.0,
                    10.0,
                    &format_value(label),
                    TextAnchor::Center,
                );
            }
            canvas.set_fill_color(pct_color);
            canvas.text(
                cx + radius * 0.6 * mid.cos(),
                cy + radius * 0.6 * mid.sin() - 3.0,
                9.0,
                &format!("{:.1}%", slice.fraction * 100.0),
                TextAnchor::Center,
            );
        }
    }

    fn draw_box(canvas: &mut PdfCanvas, axes: &Axes, color: Color32, bs: &stats::BoxStats) {
        let cx = axes.to_x(1.0);
        let half_box = axes.x_scale() * 0.25;
        let half_cap = axes.x_scale() * 0.125;

        let wl = axes.to_y(bs.whisker_low);
        let q1 = axes.to_y(bs.q1);
        let med = axes.to_y(bs.median);
        let q3 = axes.to_y(bs.q3);
        let wh = axes.to_y(bs.whisker_high);

        canvas.set_fill_color(alpha_on_white(color, 0.7));
        canvas.fill_rect(cx - half_box, q1, half_box * 2.0, q3 - q1);

        canvas.set_stroke_color(color);
        canvas.set_line_width(1.5);
        canvas.stroke_rect(cx - half_box, q1, half_box * 2.0, q3 - q1);
        canvas.line(cx - half_box, med, cx + half_box, med);
        // Whisker stems and caps.
        canvas.line(cx, wl, cx, q1);
        canvas.line(cx, q3, cx, wh);
        canvas.line(cx - half_cap, wl, cx + half_cap, wl);
        canvas.line(cx - half_cap, wh, cx + half_cap, wh);
    }

    /// Vertical color-scale bar for the density map, labeled "Counts".
    fn draw_colorbar(canvas: &mut PdfCanvas, axes: &Axes, max_count: usize) {
        let bar_x = axes.plot.x + axes.plot.w + 16.0;
        let bar_w = 12.0;
        let bar_y = axes.plot.y;
        let bar_h = axes.plot.h;

        let steps = 48;
        for s in 0..steps {
            let t = s as f64 / (steps - 1) as f64;
            canvas.set_fill_color(stats::blues_ramp(t));
            canvas.fill_rect(
                bar_x,
                bar_y + bar_h * s as f64 / steps as f64,
                bar_w,
                bar_h / steps as f64 + 0.5,
            );
        }
        canvas.set_stroke_color(BLACK);
        canvas.set_line_width(0.8);
        canvas.stroke_rect(bar_x, bar_y, bar_w, bar_h);

        canvas.set_fill_color(BLACK);
        canvas.text(bar_x + bar_w + 4.0, bar_y - 3.0, 9.0, "0", TextAnchor::Left);
        canvas.text(
            bar_x + bar_w + 4.0,
            bar_y + bar_h - 6.0,
            9.0,
            &max_count.to_string(),
            TextAnchor::Left,
        );
        canvas.text_vertical(bar_x + bar_w + 26.0, bar_y + bar_h / 2.0, 10.0, "Counts");
    }
}

/// The plot area rectangle in page coordinates.
#[derive(Debug, Clone, Copy)]
struct PlotRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Maps data coordinates into the plot rectangle and draws the frame.
struct Axes {
    plot: PlotRect,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Axes {
    fn new(plot: PlotRect, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            plot,
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
        }
    }

    fn to_x(&self, x: f64) -> f64 {
        self.plot.x + (x - self.x_min) / (self.x_max - self.x_min) * self.plot.w
    }

    fn to_y(&self, y: f64) -> f64 {
        self.plot.y + (y - self.y_min) / (self.y_max - self.y_min) * self.plot.h
    }

    /// Page units per data unit along x.
    fn x_scale(&self) -> f64 {
        self.plot.w / (self.x_max - self.x_min)
    }

    fn draw_frame(&self, canvas: &mut PdfCanvas, show_grid: bool) {
        let x_ticks = nice_ticks(self.x_min, self.x_max, MAX_TICKS);
        let y_ticks = nice_ticks(self.y_min, self.y_max, MAX_TICKS);

        if show_grid {
            canvas.set_stroke_color(GRID_GRAY);
            canvas.set_line_width(0.6);
            for &t in &x_ticks {
                let px = self.to_x(t);
                canvas.line(px, self.plot.y, px, self.plot.y + self.plot.h);
            }
            for &t in &y_ticks {
                let py = self.to_y(t);
                canvas.line(self.plot.x, py, self.plot.x + self.plot.w, py);
            }
        }

        canvas.set_stroke_color(BLACK);
        canvas.set_line_width(1.0);
        canvas.stroke_rect(self.plot.x, self.plot.y, self.plot.w, self.plot.h);

        canvas.set_fill_color(BLACK);
        for &t in &x_ticks {
            let px = self.to_x(t);
            canvas.line(px, self.plot.y, px, self.plot.y - 4.0);
            canvas.text(px, self.plot.y - 14.0, 9.0, &format_tick(t), TextAnchor::Center);
        }
        for &t in &y_ticks {
            let py = self.to_y(t);
            canvas.line(self.plot.x, py, self.plot.x - 4.0, py);
            canvas.text(
                self.plot.x - 7.0,
                py - 3.0,
                9.0,
                &format_tick(t),
                TextAnchor::Right,
            );
        }
    }
}

/// Data ranges per chart kind, padded so marks do not touch the frame.
fn data_ranges(spec: Option<&PlotSpec>) -> ((f64, f64), (f64, f64)) {
    let Some(spec) = spec else {
        return ((0.0, 1.0), (0.0, 1.0));
    };

    let (x_range, y_range) = match spec.kind {
        ChartKind::Line | ChartKind::Scatter => (extent(&spec.xs), extent(&spec.ys)),
        ChartKind::Area => (extent(&spec.xs), include_zero(extent(&spec.ys))),
        ChartKind::Bar => {
            let (x0, x1) = extent(&spec.xs);
            // Bars are 0.8 data units wide; keep the outermost ones inside.
            ((x0 - 0.4, x1 + 0.4), include_zero(extent(&spec.ys)))
        }
        ChartKind::StackedBar => {
            let segments = stats::stack_segments(&spec.xs, &spec.ys);
            let lows: Vec<f64> = segments.iter().map(|s| s.y0).collect();
            let highs: Vec<f64> = segments.iter().map(|s| s.y1).collect();
            let low = extent(&lows).0;
            let high = extent(&highs).1;
            let (x0, x1) = extent(&spec.xs);
            ((x0 - 0.4, x1 + 0.4), include_zero((low, high)))
        }
        ChartKind::Histogram => {
            let bins = stats::histogram(&spec.ys, HISTOGRAM_BINS);
            let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
            let x = bins
                .first()
                .zip(bins.last())
                .map(|(first, last)| (first.start, last.end))
                .unwrap_or((0.0, 1.0));
            (x, (0.0, max_count.max(1) as f64))
        }
        ChartKind::Pie => ((-1.4, 1.4), (-1.4, 1.4)),
        ChartKind::Box => {
            let y = stats::BoxStats::compute(&spec.ys)
                .map(|bs| (bs.whisker_low, bs.whisker_high))
                .unwrap_or((0.0, 1.0));
            ((0.0, 2.0), y)
        }
        ChartKind::Hexbin => {
            let grid = stats::HexBinGrid::compute(&spec.xs, &spec.ys, HEXBIN_GRIDSIZE);
            let xs: Vec<f64> = grid.cells.iter().map(|c| c.cx).collect();
            let ys: Vec<f64> = grid.cells.iter().map(|c| c.cy).collect();
            let (x0, x1) = extent(&xs);
            let (y0, y1) = extent(&ys);
            ((x0 - grid.sx, x1 + grid.sx), (y0 - grid.sy, y1 + grid.sy))
        }
    };

    (pad_range(x_range), pad_range(y_range))
}

fn extent(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    (min, max)
}

fn include_zero((min, max): (f64, f64)) -> (f64, f64) {
    (min.min(0.0), max.max(0.0))
}

fn pad_range((min, max): (f64, f64)) -> (f64, f64) {
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Tick values on a 1-2-5 progression covering `[min, max]`.
fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let range = max - min;
    if !(range > 0.0) || max_ticks == 0 {
        return vec![min];
    }
    let raw_step = range / max_ticks as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let step = if normalized <= 1.0 {
        magnitude
    } else if normalized <= 2.0 {
        2.0 * magnitude
    } else if normalized <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut tick = (min / step).ceil() * step;
    while tick <= max + step * 1e-6 {
        // Snap near-zero accumulation error so labels print "0", not "2e-16".
        ticks.push(if tick.abs() < step * 1e-6 { 0.0 } else { tick });
        tick += step;
        if ticks.len() > max_ticks + 2 {
            break;
        }
    }
    if ticks.is_empty() {
        ticks.push(min);
    }
    ticks
}

/// Compact tick label: integers plain, small magnitudes with decimals,
/// extremes in scientific notation.
fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if abs >= 100_000.0 || abs < 0.01 {
        format!("{:e}", v)
    } else if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else if abs >= 1.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Composite `color` over a white page at the given opacity; the content
/// stream has no transparency state, so the blend is precomputed.
fn alpha_on_white(color: Color32, alpha: f64) -> Color32 {
    let blend = |c: u8| (c as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
    Color32::from_rgb(blend(color.r()), blend(color.g()), blend(color.b()))
}

/// Darken a color by multiplying its channels.
fn shade(color: Color32, factor: f64) -> Color32 {
    let scale = |c: u8| (c as f64 * factor).round() as u8;
    Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ChartKind) -> PlotSpec {
        PlotSpec {
            kind,
            xs: vec![1.0, 2.0, 3.0, 4.0],
            ys: vec![4.0, 1.0, 3.0, 2.0],
            color: Color32::from_rgb(0, 0, 255),
            color_name: "blue".to_string(),
            show_grid: true,
        }
    }

    fn rendered(kind: ChartKind) -> String {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.pdf");
        StaticChartRenderer::export_pdf(Some(&spec(kind)), &path).expect("export");
        std::fs::read_to_string(&path).expect("read")
    }

    #[test]
    fn every_kind_exports_a_pdf() {
        for kind in ChartKind::ALL {
            let content = rendered(kind);
            assert!(content.starts_with("%PDF-"), "{:?} header", kind);
            assert!(content.contains("(Plot Title) Tj"), "{:?} title", kind);
            assert!(content.contains("(X-axis) Tj"), "{:?} x label", kind);
            assert!(content.contains("(Y-axis) Tj"), "{:?} y label", kind);
            assert!(content.ends_with("%%EOF\n"), "{:?} trailer", kind);
        }
    }

    #[test]
    fn empty_surface_exports_bare_axes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.pdf");
        StaticChartRenderer::export_pdf(None, &path).expect("export");
        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("%PDF-"));
        assert!(content.contains("(Plot Title) Tj"));
        // No series geometry beyond the frame: a bare surface has no curves.
        assert!(!content.contains(" c\n"));
    }

    #[test]
    fn line_chart_draws_a_stroked_path() {
        let content = rendered(ChartKind::Line);
        assert!(content.contains(" l\nS\n") || content.contains(" l S"), "stroked polyline");
    }

    #[test]
    fn scatter_chart_draws_circles() {
        let content = rendered(ChartKind::Scatter);
        assert!(content.matches(" c\n").count() >= 16, "four bezier arcs per marker");
    }

    #[test]
    fn hexbin_export_has_colorbar() {
        let content = rendered(ChartKind::Hexbin);
        assert!(content.contains("(Counts) Tj"));
    }

    #[test]
    fn grid_flag_controls_grid_lines() {
        let mut with_grid = spec(ChartKind::Line);
        with_grid.show_grid = true;
        let mut without_grid = with_grid.clone();
        without_grid.show_grid = false;

        let grid_ops = |s: &PlotSpec| {
            let dir = tempfile::tempdir().expect("temp dir");
            let path = dir.path().join("chart.pdf");
            StaticChartRenderer::export_pdf(Some(s), &path).expect("export");
            std::fs::read_to_string(&path)
                .expect("read")
                .matches(" l S")
                .count()
        };
        assert!(grid_ops(&with_grid) > grid_ops(&without_grid));
    }

    #[test]
    fn ticks_follow_one_two_five_steps() {
        let ticks = nice_ticks(0.0, 10.0, 8);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let ticks = nice_ticks(-1.0, 1.0, 8);
        assert!(ticks.contains(&0.0));
        assert!(ticks.len() <= 10);
    }

    #[test]
    fn tick_labels_are_compact() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(4.0), "4");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(250_000.0), "2.5e5");
    }

    #[test]
    fn alpha_blend_lightens_toward_white() {
        let blended = alpha_on_white(Color32::from_rgb(0, 0, 255), 0.6);
        assert_eq!(blended, Color32::from_rgb(102, 102, 255));
    }
}
