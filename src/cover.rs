//! The optional cover page.

use crate::draw::text::draw_centered;
use crate::embed::EmbeddedShot;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::{debug, info};
use shotdoc_layout::{LayoutConfig, StandardFont, fit_with_ellipsis, fit_within, wrap_text};
use shotdoc_render_lopdf::{PdfDocument, TextStyle};
use shotdoc_types::{PageHandle, Rect};

pub const FALLBACK_COVER_TITLE: &str = "Document";

/// Title block starts this far down the content area.
const TITLE_OFFSET_RATIO: f32 = 0.12;
const SECTION_GAP: f32 = 24.0;

/// What the cover shows.
#[derive(Debug, Clone)]
pub struct Cover<'a> {
    pub title: Option<&'a str>,
    pub hero: Option<&'a EmbeddedShot>,
    pub author: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub keywords: &'a [String],
    pub generated_at: DateTime<Utc>,
}

impl Cover<'_> {
    /// The centered lines under the title and image.
    pub fn metadata_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let present = |value: Option<&str>| value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        if let Some(author) = present(self.author) {
            lines.push(author);
        }
        if let Some(subject) = present(self.subject) {
            lines.push(subject);
        }
        let keywords = self.keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty()).join(", ");
        if !keywords.is_empty() {
            lines.push(format!("Keywords: {}", keywords));
        }
        lines.push(format!("Generated {}", self.generated_at.format("%B %-d, %Y")));
        lines
    }

    /// Inserts the cover as the first page and draws it.
    pub fn render(&self, doc: &mut PdfDocument, config: &LayoutConfig) -> PageHandle {
        let page = doc.insert_page(0);
        let title = self
            .title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_COVER_TITLE);

        let title_style = TextStyle::new(StandardFont::HelveticaBold, config.cover_title_font_size, config.text_color);
        let title_height = config.line_height(title_style.size);
        let mut y = config.content_top() + config.content_height() * TITLE_OFFSET_RATIO;
        for line in wrap_text(title, &title_style.font, title_style.size, config.content_width()) {
            draw_centered(doc, page, config, y, title_height, &line, &title_style);
            y += title_height;
        }
        y += SECTION_GAP;

        let meta_style = TextStyle::new(StandardFont::Helvetica, config.body_font_size, config.muted_color);
        let meta_height = config.body_line_height();
        let metadata = self.metadata_lines();
        let metadata_block = metadata.len() as f32 * meta_height;

        if let Some(hero) = self.hero {
            let max_height = (config.page_size.height * config.cover_image_max_height_ratio)
                .min(config.content_bottom() - y - metadata_block - SECTION_GAP);
            if max_height <= 1.0 || hero.intrinsic.is_empty() {
                debug!("No room for the cover image; drawing a text-only cover.");
            } else {
                let size = fit_within(hero.intrinsic, config.content_width(), max_height);
                let x = config.content_left() + (config.content_width() - size.width) / 2.0;
                doc.draw_image(page, &hero.image, Rect::new(x, y, size.width, size.height));
                y += size.height + SECTION_GAP;
            }
        }

        for line in &metadata {
            let line = fit_with_ellipsis(line, &meta_style.font, meta_style.size, config.content_width());
            draw_centered(doc, page, config, y, meta_height, &line, &meta_style);
            y += meta_height;
        }

        info!("Drew cover page '{}'.", title);
        page
    }
}
