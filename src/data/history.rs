//! Plot History Module
//! Append-only record of every successfully generated plot in this session.

use crate::charts::ChartKind;

/// Immutable record of one successful render request.
///
/// Stores the literal field contents as the user typed them, except for the
/// color, which holds the effective name ("blue" when the field was empty).
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub kind: ChartKind,
    pub x_raw: String,
    pub y_raw: String,
    pub color: String,
    pub show_grid: bool,
}

/// Ordered log of generated plots. Entries are never edited or removed and
/// live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct PlotHistory {
    entries: Vec<HistoryEntry>,
}

impl PlotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Infallible.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Render the whole log as display text, one numbered line per entry in
    /// insertion order.
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return "No plots have been generated yet.".to_string();
        }

        let mut text = String::from("Generated Plots:\n");
        for (idx, entry) in self.entries.iter().enumerate() {
            text.push_str(&format!(
                "{}. Type: {}, X: {}, Y: {}, Color: {}, Grid: {}\n",
                idx + 1,
                entry.kind.label(),
                entry.x_raw,
                entry.y_raw,
                entry.color,
                entry.show_grid,
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: ChartKind, x: &str, y: &str) -> HistoryEntry {
        HistoryEntry {
            kind,
            x_raw: x.to_string(),
            y_raw: y.to_string(),
            color: "blue".to_string(),
            show_grid: false,
        }
    }

    #[test]
    fn empty_log_has_fixed_message() {
        let history = PlotHistory::new();
        assert_eq!(history.summary(), "No plots have been generated yet.");
    }

    #[test]
    fn summary_lists_entries_in_insertion_order() {
        let mut history = PlotHistory::new();
        history.record(entry(ChartKind::Line, "1,2,3", "4,5,6"));
        history.record(entry(ChartKind::Scatter, "7", "8"));

        let summary = history.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Generated Plots:");
        assert_eq!(lines[1], "1. Type: Line, X: 1,2,3, Y: 4,5,6, Color: blue, Grid: false");
        assert_eq!(lines[2], "2. Type: Scatter, X: 7, Y: 8, Color: blue, Grid: false");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn record_appends_without_touching_existing_entries() {
        let mut history = PlotHistory::new();
        history.record(entry(ChartKind::Bar, "1", "2"));
        let before = history.entries()[0].clone();
        history.record(entry(ChartKind::Pie, "3", "4"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0], before);
    }
}
