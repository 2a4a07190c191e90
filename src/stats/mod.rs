//! Stats module - numeric computations behind the chart dispatcher

mod calculator;

pub use calculator::{
    blues_ramp, histogram, pie_slices, stack_segments, BoxStats, HexBinGrid, HexCell,
    HistogramBin, PieSlice, StackedSegment, HEXBIN_GRIDSIZE, HISTOGRAM_BINS,
};
