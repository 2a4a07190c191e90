//! Data module - input parsing and plot history

mod history;
mod parser;

pub use history::{HistoryEntry, PlotHistory};
pub use parser::{parse_color, parse_series, PlotRequest, DEFAULT_COLOR_NAME};
