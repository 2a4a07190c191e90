//! Charts module - chart kinds and rendering

mod plotter;
mod renderer;

pub use plotter::{ChartKind, ChartPlotter, PlotSpec};
pub use renderer::StaticChartRenderer;
