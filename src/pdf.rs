//! PDF Document Writer Module
//! Hand-assembles a single-page vector PDF from drawing operators.
//!
//! Built directly on the PDF content-stream operators because no crate
//! covers a small vector page with embedded Helvetica text. The page is
//! drawn through [`PdfCanvas`] (PDF coordinates, origin bottom-left, points)
//! and serialized by [`PdfDocument::save`] with a byte-accurate cross
//! reference table.

use std::fs;
use std::io;
use std::path::Path;

use egui::Color32;

/// Horizontal anchoring for canvas text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// Accumulates PDF content-stream operators for one page.
///
/// All coordinates are page points with the origin at the bottom-left,
/// matching the PDF default user space.
pub struct PdfCanvas {
    width: f64,
    height: f64,
    ops: String,
}

impl PdfCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.push(&format!(
            "{} {} {} RG\n",
            fmt(color.r() as f64 / 255.0),
            fmt(color.g() as f64 / 255.0),
            fmt(color.b() as f64 / 255.0)
        ));
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.push(&format!(
            "{} {} {} rg\n",
            fmt(color.r() as f64 / 255.0),
            fmt(color.g() as f64 / 255.0),
            fmt(color.b() as f64 / 255.0)
        ));
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.push(&format!("{} w\n", fmt(width)));
    }

    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.push(&format!(
            "{} {} m {} {} l S\n",
            fmt(x0),
            fmt(y0),
            fmt(x1),
            fmt(y1)
        ));
    }

    pub fn polyline(&mut self, points: &[(f64, f64)]) {
        if points.len() < 2 {
            return;
        }
        self.path(points);
        self.push("S\n");
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(&format!(
            "{} {} {} {} re S\n",
            fmt(x),
            fmt(y),
            fmt(w),
            fmt(h)
        ));
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(&format!(
            "{} {} {} {} re f\n",
            fmt(x),
            fmt(y),
            fmt(w),
            fmt(h)
        ));
    }

    pub fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        if points.len() < 3 {
            return;
        }
        self.path(points);
        self.push("h f\n");
    }

    pub fn stroke_polygon(&mut self, points: &[(f64, f64)]) {
        if points.len() < 2 {
            return;
        }
        self.path(points);
        self.push("h S\n");
    }

    /// Filled circle from four cubic Bézier arcs.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        let k = 0.552_284_75 * r;
        self.push(&format!("{} {} m\n", fmt(cx + r), fmt(cy)));
        self.push(&format!(
            "{} {} {} {} {} {} c\n",
            fmt(cx + r),
            fmt(cy + k),
            fmt(cx + k),
            fmt(cy + r),
            fmt(cx),
            fmt(cy + r)
        ));
        self.push(&format!(
            "{} {} {} {} {} {} c\n",
            fmt(cx - k),
            fmt(cy + r),
            fmt(cx - r),
            fmt(cy + k),
            fmt(cx - r),
            fmt(cy)
        ));
        self.push(&format!(
            "{} {} {} {} {} {} c\n",
            fmt(cx - r),
            fmt(cy - k),
            fmt(cx - k),
            fmt(cy - r),
            fmt(cx),
            fmt(cy - r)
        ));
        self.push(&format!(
            "{} {} {} {} {} {} c\n",
            fmt(cx + k),
            fmt(cy - r),
            fmt(cx + r),
            fmt(cy - k),
            fmt(cx + r),
            fmt(cy)
        ));
        self.push("f\n");
    }

    /// Horizontal Helvetica text with `y` at the baseline.
    pub fn text(&mut self, x: f64, y: f64, size: f64, content: &str, anchor: TextAnchor) {
        let x = match anchor {
            TextAnchor::Left => x,
            TextAnchor::Center => x - self.text_width(size, content) / 2.0,
            TextAnchor::Right => x - self.text_width(size, content),
        };
        self.push(&format!(
            "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
            fmt(size),
            fmt(x),
            fmt(y),
            escape_text(content)
        ));
    }

    /// Text rotated 90° counterclockwise (reads bottom-to-top), centered on
    /// `y` along its reading direction.
    pub fn text_vertical(&mut self, x: f64, y: f64, size: f64, content: &str) {
        let y = y - self.text_width(size, content) / 2.0;
        self.push(&format!(
            "BT /F1 {} Tf 0 1 -1 0 {} {} Tm ({}) Tj ET\n",
            fmt(size),
            fmt(x),
            fmt(y),
            escape_text(content)
        ));
    }

    /// Approximate Helvetica advance width of `content` at `size`.
    pub fn text_width(&self, size: f64, content: &str) -> f64 {
        content.chars().map(|c| char_width(c) * size).sum()
    }

    fn path(&mut self, points: &[(f64, f64)]) {
        let (x0, y0) = points[0];
        self.push(&format!("{} {} m\n", fmt(x0), fmt(y0)));
        for &(x, y) in &points[1..] {
            self.push(&format!("{} {} l\n", fmt(x), fmt(y)));
        }
    }

    fn push(&mut self, op: &str) {
        self.ops.push_str(op);
    }
}

/// Serializes a [`PdfCanvas`] into a complete one-page PDF file.
pub struct PdfDocument;

impl PdfDocument {
    pub fn save(path: &Path, canvas: &PdfCanvas) -> io::Result<()> {
        let content = &canvas.ops;

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>",
                fmt(canvas.width),
                fmt(canvas.height)
            ),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (idx, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", idx + 1, body));
        }

        let xref_offset = out.len();
        out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
        out.push_str("0000000000 65535 f \n");
        for offset in &offsets {
            out.push_str(&format!("{:010} 00000 n \n", offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));

        fs::write(path, out)
    }
}

/// Escape a string for a PDF literal string: backslash and parentheses,
/// with non-WinAnsi characters replaced.
fn escape_text(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            c if c.is_ascii_graphic() || c == ' ' => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Approximate Helvetica advance width in em for one character.
fn char_width(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.35,
        'm' | 'w' => 0.83,
        'M' | 'W' => 0.94,
        '%' => 0.89,
        ' ' => 0.28,
        'A'..='Z' => 0.70,
        _ => 0.55,
    }
}

/// Compact decimal formatting for operator operands.
fn fmt(v: f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_canvas() -> PdfCanvas {
        let mut canvas = PdfCanvas::new(576.0, 432.0);
        canvas.set_stroke_color(Color32::from_rgb(0, 0, 0));
        canvas.set_line_width(1.0);
        canvas.stroke_rect(50.0, 40.0, 480.0, 350.0);
        canvas.set_fill_color(Color32::from_rgb(0, 0, 255));
        canvas.fill_circle(100.0, 100.0, 3.0);
        canvas.text(288.0, 410.0, 14.0, "Plot Title", TextAnchor::Center);
        canvas.text_vertical(20.0, 215.0, 10.0, "Y-axis");
        canvas
    }

    #[test]
    fn document_has_pdf_structure() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.pdf");
        PdfDocument::save(&path, &sample_canvas()).expect("save");

        let content = fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("%PDF-1.4"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Page "));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("stream\n"));
        assert!(content.contains("endstream"));
        assert!(content.contains("(Plot Title) Tj"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.pdf");
        PdfDocument::save(&path, &sample_canvas()).expect("save");

        let content = fs::read_to_string(&path).expect("read");

        // startxref names the byte offset of the xref table itself.
        let startxref: usize = content
            .split("startxref\n")
            .nth(1)
            .and_then(|rest| rest.lines().next())
            .and_then(|line| line.parse().ok())
            .expect("startxref offset");
        assert!(content[startxref..].starts_with("xref"));

        // Each in-use entry points at the matching "N 0 obj" header.
        let xref_block = &content[startxref..];
        for (i, line) in xref_block
            .lines()
            .skip(3) // "xref", "0 6", free entry
            .take(5)
            .enumerate()
        {
            let offset: usize = line.split(' ').next().unwrap().parse().unwrap();
            assert!(
                content[offset..].starts_with(&format!("{} 0 obj", i + 1)),
                "object {} offset mismatch",
                i + 1
            );
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.pdf");
        PdfDocument::save(&path, &sample_canvas()).expect("save");

        let content = fs::read_to_string(&path).expect("read");
        let length: usize = content
            .split("/Length ")
            .nth(1)
            .and_then(|rest| rest.split(' ').next())
            .and_then(|n| n.parse().ok())
            .expect("stream length");
        let start = content.find("stream\n").unwrap() + "stream\n".len();
        let end = content.find("endstream").unwrap();
        assert_eq!(end - start, length);
    }

    #[test]
    fn text_is_escaped() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.text(0.0, 0.0, 10.0, "a(b)c\\d", TextAnchor::Left);
        assert!(canvas.ops.contains("(a\\(b\\)c\\\\d) Tj"));
    }

    #[test]
    fn anchored_text_shifts_left_of_position() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        let width = canvas.text_width(10.0, "abc");
        canvas.text(50.0, 0.0, 10.0, "abc", TextAnchor::Center);
        assert!(canvas.ops.contains(&format!("{} 0 Td", fmt(50.0 - width / 2.0))));
    }
}
