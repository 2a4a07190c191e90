//! End-to-end checks of the generate/clear/history/export flow on the
//! non-GUI core: the same path the Generate button takes, minus the widgets.

use plotdesk::charts::{ChartKind, StaticChartRenderer};
use plotdesk::data::{HistoryEntry, PlotHistory, PlotRequest};
use plotdesk::gui::{ChartView, PlotForm};
use plotdesk::PlotError;

fn request(kind: ChartKind, x: &str, y: &str, color: &str) -> PlotRequest {
    PlotRequest {
        kind,
        x_raw: x.to_string(),
        y_raw: y.to_string(),
        color_raw: color.to_string(),
        show_grid: false,
    }
}

/// Run one Generate action against a history, the way the app does:
/// resolve first, then record and replace the surface only on success.
fn generate(
    history: &mut PlotHistory,
    view: &mut ChartView,
    request: &PlotRequest,
) -> Result<(), PlotError> {
    let spec = request.resolve()?;
    history.record(HistoryEntry {
        kind: spec.kind,
        x_raw: request.x_raw.clone(),
        y_raw: request.y_raw.clone(),
        color: spec.color_name.clone(),
        show_grid: request.show_grid,
    });
    view.set_spec(spec);
    Ok(())
}

#[test]
fn every_kind_generates_and_appends_one_entry() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();

    for (i, kind) in ChartKind::ALL.into_iter().enumerate() {
        generate(&mut history, &mut view, &request(kind, "1,2,3", "4,5,6", "red"))
            .expect("valid input renders");
        assert_eq!(history.len(), i + 1);
        assert_eq!(view.spec().unwrap().kind, kind);
    }

    let entries = history.entries();
    assert_eq!(entries.len(), ChartKind::ALL.len());
    for (entry, kind) in entries.iter().zip(ChartKind::ALL) {
        assert_eq!(entry.kind, kind);
        assert_eq!(entry.x_raw, "1,2,3");
        assert_eq!(entry.y_raw, "4,5,6");
        assert_eq!(entry.color, "red");
    }
}

#[test]
fn empty_color_defaults_to_blue_in_history() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();

    generate(&mut history, &mut view, &request(ChartKind::Line, "1,2,3", "4,5,6", ""))
        .expect("valid input renders");

    let entry = &history.entries()[0];
    assert_eq!(entry.kind, ChartKind::Line);
    assert_eq!(entry.x_raw, "1,2,3");
    assert_eq!(entry.y_raw, "4,5,6");
    assert_eq!(entry.color, "blue");
    assert!(!entry.show_grid);
}

#[test]
fn length_mismatch_reports_and_leaves_state_unchanged() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();

    let err = generate(&mut history, &mut view, &request(ChartKind::Line, "1,2", "3,4,5", ""))
        .unwrap_err();
    assert!(err.to_string().contains("number of X and Y values must be the same"));
    assert_eq!(history.len(), 0);
    assert!(view.spec().is_none());
}

#[test]
fn non_numeric_tokens_report_and_leave_state_unchanged() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();

    let err = generate(&mut history, &mut view, &request(ChartKind::Line, "a,b", "1,2", ""))
        .unwrap_err();
    assert!(err.to_string().contains("valid numeric values"));
    assert_eq!(history.len(), 0);
    assert!(view.spec().is_none());

    // A failed request after a successful one keeps the prior surface.
    generate(&mut history, &mut view, &request(ChartKind::Bar, "1", "2", ""))
        .expect("valid input renders");
    let err = generate(&mut history, &mut view, &request(ChartKind::Line, "x", "2", ""));
    assert!(err.is_err());
    assert_eq!(history.len(), 1);
    assert_eq!(view.spec().unwrap().kind, ChartKind::Bar);
}

#[test]
fn clear_resets_form_and_surface_but_not_history() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();
    let mut form = PlotForm {
        kind: ChartKind::Area,
        x_raw: "1,2".to_string(),
        y_raw: "3,4".to_string(),
        color_raw: "green".to_string(),
        show_grid: true,
    };

    generate(&mut history, &mut view, &form.to_request()).expect("valid input renders");
    assert_eq!(history.len(), 1);

    // The Clear All action.
    form.reset();
    view.clear();

    assert_eq!(form, PlotForm::default());
    assert!(view.spec().is_none());
    assert_eq!(history.len(), 1);
}

#[test]
fn history_summary_grows_line_by_line() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();
    assert_eq!(history.summary(), "No plots have been generated yet.");

    generate(&mut history, &mut view, &request(ChartKind::Line, "1,2,3", "4,5,6", ""))
        .expect("valid input renders");
    generate(&mut history, &mut view, &request(ChartKind::Pie, "1,2", "3,4", "gold"))
        .expect("valid input renders");

    let summary = history.summary();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Generated Plots:");
    assert_eq!(lines[1], "1. Type: Line, X: 1,2,3, Y: 4,5,6, Color: blue, Grid: false");
    assert_eq!(lines[2], "2. Type: Pie, X: 1,2, Y: 3,4, Color: gold, Grid: false");
}

#[test]
fn export_writes_pdf_for_current_surface() {
    let mut history = PlotHistory::new();
    let mut view = ChartView::new();
    generate(&mut history, &mut view, &request(ChartKind::Scatter, "1,2,3", "4,5,6", "navy"))
        .expect("valid input renders");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("plot.pdf");
    StaticChartRenderer::export_pdf(view.spec(), &path).expect("export");

    let content = std::fs::read(&path).expect("read");
    assert!(content.starts_with(b"%PDF-"));
    assert!(content.ends_with(b"%%EOF\n"));
}

#[test]
fn export_into_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("does-not-exist").join("plot.pdf");
    let err = StaticChartRenderer::export_pdf(None, &path).unwrap_err();
    assert!(matches!(err, PlotError::Io(_)));
}
