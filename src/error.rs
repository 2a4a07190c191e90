//! Error types for PlotDesk.
//!
//! One small error surface covers the whole application: user input
//! validation, color/plot-type resolution, and export I/O.

use thiserror::Error;

/// Result type alias for PlotDesk operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while validating input or exporting a chart.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A token in the X or Y field did not parse as a number.
    #[error("Please enter valid numeric values separated by commas (could not read \"{token}\")")]
    InvalidNumber { token: String },

    /// X and Y parsed to sequences of different lengths.
    #[error("The number of X and Y values must be the same (got {x_len} X and {y_len} Y)")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// The color field held a name that is not recognized.
    #[error("Unknown color \"{0}\" (use a color name like \"red\" or hex like \"#1f77b4\")")]
    UnknownColor(String),

    /// A plot-type label did not match any supported chart kind.
    #[error("Unknown plot type \"{0}\"")]
    UnknownPlotType(String),

    /// Export write failure.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}
