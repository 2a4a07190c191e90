//! Series Calculator Module
//! Pure numeric computations the chart kinds are built from: histogram
//! binning, box-plot statistics, hexagonal density binning, pie fractions,
//! and stacked-bar segment accumulation. Everything here is display-agnostic
//! so both the interactive surface and the PDF renderer share one result.

use std::collections::HashMap;

use egui::Color32;

/// Fixed bin count for histogram charts.
pub const HISTOGRAM_BINS: usize = 30;

/// Hexagons across the x range for hexbin charts.
pub const HEXBIN_GRIDSIZE: usize = 50;

/// One histogram bin over `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bin `values` into `bins` equal-width intervals spanning the data range.
///
/// A degenerate range (all values equal, or a single value) is widened to
/// `value ± 0.5` so the sample still lands in a drawable bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        if v.is_nan() {
            continue;
        }
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Five-number summary for a box plot.
///
/// Quartiles use linear interpolation between order statistics; whiskers
/// reach the most extreme data points within 1.5×IQR of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

impl BoxStats {
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Some(Self {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
        })
    }
}

/// Linearly interpolated quantile of an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// One occupied cell of a hexagonal density grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub cx: f64,
    pub cy: f64,
    pub count: usize,
}

/// Hexagonal density binning of a point cloud.
///
/// `sx`/`sy` are the center-to-center lattice spacings in data units; the
/// drawable hexagon for a cell spans `cx ± sx/2` horizontally and
/// `cy ± sy/2` vertically (pointy-top, two staggered lattices).
#[derive(Debug, Clone)]
pub struct HexBinGrid {
    pub cells: Vec<HexCell>,
    pub sx: f64,
    pub sy: f64,
    pub max_count: usize,
}

impl HexBinGrid {
    /// Bin `(xs, ys)` with `gridsize` hexagons across the x range. Points are
    /// assigned to the nearer of two staggered rectangular lattices, which
    /// together tile the plane hexagonally.
    pub fn compute(xs: &[f64], ys: &[f64], gridsize: usize) -> Self {
        let empty = Self {
            cells: Vec::new(),
            sx: 1.0,
            sy: 1.0,
            max_count: 0,
        };
        if xs.is_empty() || gridsize == 0 {
            return empty;
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (&x, &y) in xs.iter().zip(ys) {
            if x.is_nan() || y.is_nan() {
                continue;
            }
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !x_min.is_finite() || !y_min.is_finite() {
            return empty;
        }
        if x_min == x_max {
            x_min -= 0.5;
            x_max += 0.5;
        }
        if y_min == y_max {
            y_min -= 0.5;
            y_max += 0.5;
        }

        let nx = gridsize;
        let ny = ((gridsize as f64) / 3f64.sqrt()).round().max(1.0) as usize;
        let sx = (x_max - x_min) / nx as f64;
        let sy = (y_max - y_min) / ny as f64;

        // Key: (lattice, column, row). Lattice 1 is offset by (sx/2, sy/2).
        let mut counts: HashMap<(u8, i64, i64), usize> = HashMap::new();
        for (&x, &y) in xs.iter().zip(ys) {
            if x.is_nan() || y.is_nan() {
                continue;
            }
            let u = (x - x_min) / sx;
            let v = (y - y_min) / sy;

            let i1 = u.round();
            let j1 = v.round();
            let i2 = (u - 0.5).round();
            let j2 = (v - 0.5).round();

            let d1 = (u - i1).powi(2) + 3.0 * (v - j1).powi(2);
            let d2 = (u - 0.5 - i2).powi(2) + 3.0 * (v - 0.5 - j2).powi(2);

            let key = if d1 <= d2 {
                (0u8, i1 as i64, j1 as i64)
            } else {
                (1u8, i2 as i64, j2 as i64)
            };
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut cells: Vec<HexCell> = counts
            .into_iter()
            .map(|((lattice, i, j), count)| {
                let offset = if lattice == 1 { 0.5 } else { 0.0 };
                HexCell {
                    cx: x_min + (i as f64 + offset) * sx,
                    cy: y_min + (j as f64 + offset) * sy,
                    count,
                }
            })
            .collect();
        cells.sort_by(|a, b| {
            (a.cx, a.cy)
                .partial_cmp(&(b.cx, b.cy))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let max_count = cells.iter().map(|c| c.count).max().unwrap_or(0);
        Self {
            cells,
            sx,
            sy,
            max_count,
        }
    }

    /// Total number of binned points.
    pub fn total(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }
}

/// Sequential white-to-blue color ramp for density cells, `t` in `[0, 1]`.
pub fn blues_ramp(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    Color32::from_rgb(lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0))
}

/// One pie slice. Angles are radians, measured counterclockwise from the
/// positive x axis; slices begin at 12 o'clock (90°) and proceed
/// counterclockwise in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Slice fractions for a pie chart: `|y| / Σ|y|`. Returns an empty vector
/// when the magnitude sum is zero, which renders as an empty surface.
pub fn pie_slices(ys: &[f64]) -> Vec<PieSlice> {
    let total: f64 = ys.iter().map(|y| y.abs()).filter(|y| !y.is_nan()).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = std::f64::consts::FRAC_PI_2;
    ys.iter()
        .enumerate()
        .map(|(index, y)| {
            let fraction = if y.is_nan() { 0.0 } else { y.abs() / total };
            let end = start + fraction * std::f64::consts::TAU;
            let slice = PieSlice {
                index,
                fraction,
                start_angle: start,
                end_angle: end,
            };
            start = end;
            slice
        })
        .collect()
}

/// One stacked-bar segment spanning `y0..y1` at `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedSegment {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Accumulate stacked-bar segments: values sharing an x coordinate stack in
/// input order, positives upward and negatives downward. Distinct x values
/// degenerate to plain bars from zero.
pub fn stack_segments(xs: &[f64], ys: &[f64]) -> Vec<StackedSegment> {
    let mut totals: HashMap<u64, (f64, f64)> = HashMap::new();
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let (pos, neg) = totals.entry(x.to_bits()).or_insert((0.0, 0.0));
            if y >= 0.0 {
                let segment = StackedSegment {
                    x,
                    y0: *pos,
                    y1: *pos + y,
                };
                *pos += y;
                segment
            } else {
                let segment = StackedSegment {
                    x,
                    y0: *neg + y,
                    y1: *neg,
                };
                *neg += y;
                segment
            }
        })
        .collect()
}
