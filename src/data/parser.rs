//! Input Parser Module
//! Turns the raw form fields into a validated, render-ready plot request.

use egui::Color32;

use crate::charts::{ChartKind, PlotSpec};
use crate::error::{PlotError, Result};

/// Effective color name used when the color field is left empty.
pub const DEFAULT_COLOR_NAME: &str = "blue";

/// Named colors accepted in the color field.
const NAMED_COLORS: [(&str, Color32); 24] = [
    ("black", Color32::from_rgb(0, 0, 0)),
    ("white", Color32::from_rgb(255, 255, 255)),
    ("red", Color32::from_rgb(255, 0, 0)),
    ("green", Color32::from_rgb(0, 128, 0)),
    ("blue", Color32::from_rgb(0, 0, 255)),
    ("yellow", Color32::from_rgb(255, 255, 0)),
    ("cyan", Color32::from_rgb(0, 255, 255)),
    ("magenta", Color32::from_rgb(255, 0, 255)),
    ("orange", Color32::from_rgb(255, 165, 0)),
    ("purple", Color32::from_rgb(128, 0, 128)),
    ("pink", Color32::from_rgb(255, 192, 203)),
    ("brown", Color32::from_rgb(165, 42, 42)),
    ("gray", Color32::from_rgb(128, 128, 128)),
    ("grey", Color32::from_rgb(128, 128, 128)),
    ("olive", Color32::from_rgb(128, 128, 0)),
    ("navy", Color32::from_rgb(0, 0, 128)),
    ("teal", Color32::from_rgb(0, 128, 128)),
    ("lime", Color32::from_rgb(0, 255, 0)),
    ("gold", Color32::from_rgb(255, 215, 0)),
    ("salmon", Color32::from_rgb(250, 128, 114)),
    ("violet", Color32::from_rgb(238, 130, 238)),
    ("crimson", Color32::from_rgb(220, 20, 60)),
    ("maroon", Color32::from_rgb(128, 0, 0)),
    ("skyblue", Color32::from_rgb(135, 206, 235)),
];

/// Single-letter shorthands for the most common colors.
const LETTER_COLORS: [(&str, &str); 8] = [
    ("b", "blue"),
    ("g", "green"),
    ("r", "red"),
    ("c", "cyan"),
    ("m", "magenta"),
    ("y", "yellow"),
    ("k", "black"),
    ("w", "white"),
];

/// Parse a comma-separated list of numbers.
///
/// Tokens are trimmed before parsing. An empty field produces one empty
/// token and is therefore rejected like any other non-numeric token.
pub fn parse_series(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| PlotError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a color field value into a concrete color.
///
/// Accepts the names in [`NAMED_COLORS`], the single-letter shorthands, and
/// `#rgb` / `#rrggbb` hex. The empty string resolves to the default blue.
pub fn parse_color(raw: &str) -> Result<Color32> {
    let name = raw.trim();
    if name.is_empty() {
        return parse_color(DEFAULT_COLOR_NAME);
    }

    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| PlotError::UnknownColor(name.to_string()));
    }

    let lower = name.to_ascii_lowercase();
    let lookup = LETTER_COLORS
        .iter()
        .find(|(letter, _)| *letter == lower)
        .map(|(_, full)| *full)
        .unwrap_or(lower.as_str());

    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == lookup)
        .map(|(_, color)| *color)
        .ok_or_else(|| PlotError::UnknownColor(name.to_string()))
}

fn parse_hex_color(hex: &str) -> Option<Color32> {
    let expand = |nibble: u8| nibble << 4 | nibble;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color32::from_rgb(expand(r), expand(g), expand(b)))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        _ => None,
    }
}

/// Snapshot of the input form at the moment Generate is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub kind: ChartKind,
    pub x_raw: String,
    pub y_raw: String,
    pub color_raw: String,
    pub show_grid: bool,
}

impl PlotRequest {
    /// Validate the request and produce a render-ready [`PlotSpec`].
    ///
    /// Parses both series, checks they are the same length, and resolves the
    /// color. Nothing is mutated on failure; the caller surfaces the error
    /// and the chart surface and history stay as they were.
    pub fn resolve(&self) -> Result<PlotSpec> {
        let xs = parse_series(&self.x_raw)?;
        let ys = parse_series(&self.y_raw)?;

        if xs.len() != ys.len() {
            return Err(PlotError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }

        let color = parse_color(&self.color_raw)?;
        let color_name = if self.color_raw.trim().is_empty() {
            DEFAULT_COLOR_NAME.to_string()
        } else {
            self.color_raw.trim().to_string()
        };

        Ok(PlotSpec {
            kind: self.kind,
            xs,
            ys,
            color,
            color_name,
            show_grid: self.show_grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_numbers() {
        assert_eq!(parse_series("1,2,3").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_series(" 1.5 , -2 , 3e2 ").unwrap(), vec![1.5, -2.0, 300.0]);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = parse_series("a,b").unwrap_err();
        assert!(err.to_string().contains("valid numeric values"));

        let err = parse_series("1,,2").unwrap_err();
        assert!(matches!(err, PlotError::InvalidNumber { .. }));
    }

    #[test]
    fn empty_field_is_a_parse_error() {
        assert!(parse_series("").is_err());
    }

    #[test]
    fn resolves_named_letter_and_hex_colors() {
        assert_eq!(parse_color("red").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_color("RED").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_color("k").unwrap(), Color32::from_rgb(0, 0, 0));
        assert_eq!(parse_color("#ff8000").unwrap(), Color32::from_rgb(255, 128, 0));
        assert_eq!(parse_color("#f80").unwrap(), Color32::from_rgb(255, 136, 0));
    }

    #[test]
    fn empty_color_defaults_to_blue() {
        assert_eq!(parse_color("").unwrap(), Color32::from_rgb(0, 0, 255));
        assert_eq!(parse_color("  ").unwrap(), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn unknown_color_is_rejected() {
        assert!(matches!(parse_color("blurple"), Err(PlotError::UnknownColor(_))));
        assert!(matches!(parse_color("#12345"), Err(PlotError::UnknownColor(_))));
    }

    #[test]
    fn resolve_checks_lengths() {
        let request = PlotRequest {
            kind: ChartKind::Line,
            x_raw: "1,2".to_string(),
            y_raw: "3,4,5".to_string(),
            color_raw: String::new(),
            show_grid: false,
        };
        let err = request.resolve().unwrap_err();
        assert!(err.to_string().contains("number of X and Y values must be the same"));
    }

    #[test]
    fn resolve_records_effective_color_name() {
        let request = PlotRequest {
            kind: ChartKind::Line,
            x_raw: "1,2,3".to_string(),
            y_raw: "4,5,6".to_string(),
            color_raw: String::new(),
            show_grid: false,
        };
        let spec = request.resolve().unwrap();
        assert_eq!(spec.color_name, "blue");
        assert_eq!(spec.xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(spec.ys, vec![4.0, 5.0, 6.0]);

        let request = PlotRequest {
            color_raw: " crimson ".to_string(),
            ..request
        };
        assert_eq!(request.resolve().unwrap().color_name, "crimson");
    }
}
