//! Table of contents.
//!
//! The contents can only be drawn once every content page exists, yet they
//! are placed in front of those pages. The work is split into states that
//! consume each other:
//!
//! 1. [`AnchorRecorder`] collects an [`Anchor`] for every title and heading
//!    during the content pass.
//! 2. [`TocPlan::compute`] works out how many pages the entries need.
//! 3. [`TocPlan::insert`] inserts those pages after the cover, if any.
//! 4. [`TocPages::render`] draws the entries with links to the recorded
//!    page handles, which are unaffected by the insertion.

use crate::draw::text::{draw_line_at, draw_right_aligned, text_width};
use log::{debug, info};
use shotdoc_layout::algorithms::pagination::TocCapacity;
use shotdoc_layout::{LayoutConfig, StandardFont, fit_with_ellipsis};
use shotdoc_render_lopdf::{PdfDocument, TextStyle};
use shotdoc_types::{Anchor, PageHandle, Rect};

pub const TOC_TITLE: &str = "Contents";

/// Space between an entry title and its page number.
const NUMBER_GAP: f32 = 12.0;

/// Anchors recorded in drawing order.
#[derive(Debug, Clone, Default)]
pub struct AnchorRecorder {
    anchors: Vec<Anchor>,
}

impl AnchorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, anchor: Anchor) {
        debug!("Anchor '{}' (level {}) on {} at y={:.1}.", anchor.title, anchor.level, anchor.page, anchor.y);
        self.anchors.push(anchor);
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}

/// Height of the "Contents" heading block on the first TOC page.
fn heading_block(config: &LayoutConfig) -> f32 {
    config.line_height(config.section_font_size) + config.heading_space_after + config.block_spacing
}

/// Page count of the table of contents for a set of anchors.
#[derive(Debug)]
pub struct TocPlan<'a> {
    anchors: &'a [Anchor],
    capacity: TocCapacity,
    pages_needed: usize,
}

impl<'a> TocPlan<'a> {
    /// Returns `None` when there is nothing to list.
    pub fn compute(anchors: &'a [Anchor], config: &LayoutConfig) -> Option<Self> {
        if anchors.is_empty() {
            debug!("No anchors recorded; skipping the table of contents.");
            return None;
        }
        let capacity = TocCapacity::new(config.content_height(), heading_block(config), config.body_line_height());
        let pages_needed = capacity.pages_needed(anchors.len());
        Some(Self {
            anchors,
            capacity,
            pages_needed,
        })
    }

    pub fn pages_needed(&self) -> usize {
        self.pages_needed
    }

    /// Inserts the TOC pages starting at page index `at`.
    pub fn insert(self, doc: &mut PdfDocument, at: usize) -> TocPages<'a> {
        let pages = (0..self.pages_needed).map(|offset| doc.insert_page(at + offset)).collect();
        info!(
            "Inserted {} table of contents page(s) at index {} for {} entries.",
            self.pages_needed,
            at,
            self.anchors.len()
        );
        TocPages {
            anchors: self.anchors,
            capacity: self.capacity,
            pages,
        }
    }
}

/// Inserted, still blank TOC pages.
#[derive(Debug)]
pub struct TocPages<'a> {
    anchors: &'a [Anchor],
    capacity: TocCapacity,
    pages: Vec<PageHandle>,
}

impl TocPages<'_> {
    pub fn pages(&self) -> &[PageHandle] {
        &self.pages
    }

    /// Draws every entry. Must run after the last page insertion so the
    /// printed page numbers are final.
    pub fn render(self, doc: &mut PdfDocument, config: &LayoutConfig) {
        let heading_style = TextStyle::new(StandardFont::HelveticaBold, config.section_font_size, config.text_color);
        let line_height = config.body_line_height();
        let mut entries = self.anchors.iter();

        for (index, page) in self.pages.iter().enumerate() {
            let mut y = config.content_top();
            if index == 0 {
                draw_line_at(
                    doc,
                    *page,
                    config.content_left(),
                    y,
                    config.line_height(config.section_font_size),
                    TOC_TITLE,
                    &heading_style,
                );
                y += heading_block(config);
            }

            for anchor in entries.by_ref().take(self.capacity.capacity_of(index)) {
                draw_entry(doc, config, *page, y, anchor);
                y += line_height;
            }
        }
    }
}

fn draw_entry(doc: &mut PdfDocument, config: &LayoutConfig, page: PageHandle, top: f32, anchor: &Anchor) {
    let line_height = config.body_line_height();
    let font = if anchor.is_nested() { StandardFont::Helvetica } else { StandardFont::HelveticaBold };
    let style = TextStyle::new(font, config.body_font_size, config.text_color);
    let number_style = TextStyle::new(StandardFont::Helvetica, config.body_font_size, config.muted_color);

    let number = doc
        .page_number(anchor.page)
        .map(|n| n.to_string())
        .unwrap_or_default();
    let number_width = text_width(&number, &number_style);

    let x = config.content_left() + if anchor.is_nested() { config.toc_indent } else { 0.0 };
    let available = config.content_right() - NUMBER_GAP - number_width - x;
    let title = fit_with_ellipsis(&anchor.title, &font, config.body_font_size, available);

    draw_line_at(doc, page, x, top, line_height, &title, &style);
    draw_right_aligned(doc, page, config.content_right(), top, line_height, &number, &number_style);
    doc.link_to_page(
        page,
        Rect::new(config.content_left(), top, config.content_width(), line_height),
        anchor.page,
        anchor.y,
    );
}
