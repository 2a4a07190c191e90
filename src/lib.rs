//! PlotDesk - interactive desktop plotting application.
//!
//! Enter comma-separated numeric series, pick one of nine chart kinds, and
//! render it onto an embedded interactive surface. Successful plots are kept
//! in a session history, and the current surface can be exported as a
//! single-page vector PDF.
//!
//! The crate is split so the GUI stays a thin shell:
//!
//! - [`data`]: input parsing/validation and the plot history
//! - [`stats`]: pure numeric computations behind the chart kinds
//! - [`charts`]: the chart-kind dispatch for screen and export rendering
//! - [`pdf`]: the hand-assembled PDF document writer
//! - [`gui`]: eframe application, form, surface, and dialogs

pub mod charts;
pub mod data;
pub mod error;
pub mod gui;
pub mod pdf;
pub mod stats;

pub use error::{PlotError, Result};
