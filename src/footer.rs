//! Footers, stamped once every page is in place.

use crate::draw::text::{draw_line_at, draw_right_aligned};
use log::debug;
use shotdoc_layout::{LayoutConfig, StandardFont, fit_with_ellipsis};
use shotdoc_render_lopdf::{PdfDocument, TextStyle};

const DIVIDER_WIDTH: f32 = 0.5;
/// Minimum space between the running title and the page number.
const COLUMN_GAP: f32 = 24.0;

/// The `N / total` label of the page at zero-based `index`.
pub fn page_label(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

/// Draws a divider, the running title and the page number on every page.
///
/// With `skip_cover`, the first page is left untouched.
pub fn stamp_footers(doc: &mut PdfDocument, config: &LayoutConfig, running_title: &str, skip_cover: bool) {
    let style = TextStyle::new(StandardFont::Helvetica, config.footer_font_size, config.muted_color);
    let line_height = config.line_height(style.size);
    let divider_y = config.content_bottom() + config.footer_offset / 2.0;
    let row_top = config.content_bottom() + config.footer_offset;

    let pages = doc.pages().to_vec();
    let total = pages.len();
    for (index, page) in pages.into_iter().enumerate() {
        if skip_cover && index == 0 {
            continue;
        }
        doc.draw_line(
            page,
            (config.content_left(), divider_y),
            (config.content_right(), divider_y),
            DIVIDER_WIDTH,
            config.rule_color,
        );

        let label = page_label(index, total);
        let label_width = draw_right_aligned(doc, page, config.content_right(), row_top, line_height, &label, &style);
        let title_width = config.content_width() - label_width - COLUMN_GAP;
        let title = fit_with_ellipsis(running_title, &style.font, style.size, title_width);
        draw_line_at(doc, page, config.content_left(), row_top, line_height, &title, &style);
    }
    debug!(
        "Stamped footers on {} of {} pages.",
        total - usize::from(skip_cover && total > 0),
        total
    );
}
