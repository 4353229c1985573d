//! Single-line text placement shared by the content, TOC, cover and footer passes.

use shotdoc_layout::{FontMetrics, LayoutConfig};
use shotdoc_render_lopdf::{PdfDocument, TextStyle};
use shotdoc_types::PageHandle;

/// Fraction of the font size above the baseline for Helvetica.
const ASCENT: f32 = 0.8;

/// Baseline of a line whose box starts at `top` and is `line_height` tall.
pub(crate) fn baseline(top: f32, line_height: f32, size: f32) -> f32 {
    top + (line_height - size) / 2.0 + size * ASCENT
}

pub(crate) fn text_width(text: &str, style: &TextStyle) -> f32 {
    style.font.text_width(text, style.size)
}

/// Draws `text` at `x` in the line box starting at `top`.
pub(crate) fn draw_line_at(doc: &mut PdfDocument, page: PageHandle, x: f32, top: f32, line_height: f32, text: &str, style: &TextStyle) {
    doc.draw_text(page, x, baseline(top, line_height, style.size), text, style);
}

/// Draws `text` centered in the content area.
pub(crate) fn draw_centered(
    doc: &mut PdfDocument,
    page: PageHandle,
    config: &LayoutConfig,
    top: f32,
    line_height: f32,
    text: &str,
    style: &TextStyle,
) {
    let x = config.content_left() + ((config.content_width() - text_width(text, style)) / 2.0).max(0.0);
    draw_line_at(doc, page, x, top, line_height, text, style);
}

/// Draws `text` so it ends at `right` and returns its width.
pub(crate) fn draw_right_aligned(
    doc: &mut PdfDocument,
    page: PageHandle,
    right: f32,
    top: f32,
    line_height: f32,
    text: &str,
    style: &TextStyle,
) -> f32 {
    let width = text_width(text, style);
    draw_line_at(doc, page, right - width, top, line_height, text, style);
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_sits_inside_the_line_box() {
        let top = 100.0;
        let y = baseline(top, 15.4, 11.0);
        assert!(y > top + 11.0 * 0.5 && y < top + 15.4);
    }
}
