//! PlotDesk - interactive desktop plotting with PDF export.

use anyhow::Result;
use eframe::egui;
use plotdesk::gui::PlotDeskApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logging follows RUST_LOG; silent by default.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("PlotDesk"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PlotDesk",
        options,
        Box::new(|cc| Ok(Box::new(PlotDeskApp::new(cc)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run PlotDesk: {err}"))
}
