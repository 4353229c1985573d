//! The content pass: draws layout blocks in order onto a growing document.
//!
//! Every routine takes the current [`PageState`] and returns the next one.
//! Before writing, each routine asks the state for room through
//! `ensure_space` (per line) or `ensure_atomic_group` (headings with their
//! keep-next lines, whole figures), so page breaks only ever happen between
//! lines or in front of a group.

mod linkify;
pub(crate) mod text;

use crate::embed::{EmbeddedShot, EmbeddedShots};
use crate::toc::AnchorRecorder;
use crate::warnings::Warnings;
use log::debug;
use shotdoc_idf::{HeadingLevel, HeadingOptions, LayoutBlock, ParagraphStyle};
use shotdoc_layout::{
    FontMetrics, LayoutConfig, PageState, StandardFont, WrappedText, size_for_current_page, size_for_fresh_page,
    wrap_paragraphs, wrap_text,
};
use shotdoc_render_lopdf::{PdfDocument, TextStyle};
use shotdoc_types::{Anchor, Rect, ShotId};
use linkify::{LinkedLines, Segment};
use text::{baseline, draw_centered, text_width};

const BULLET: &str = "•";

/// Thickness of the rule under the document title.
const TITLE_RULE_WIDTH: f32 = 0.75;

/// Draws blocks into a document, recording anchors and warnings on the way.
pub struct Drawer<'a> {
    doc: &'a mut PdfDocument,
    config: &'a LayoutConfig,
    shots: &'a EmbeddedShots,
    anchors: &'a mut AnchorRecorder,
    warnings: &'a mut Warnings,
    linkify: bool,
}

impl<'a> Drawer<'a> {
    pub fn new(
        doc: &'a mut PdfDocument,
        config: &'a LayoutConfig,
        shots: &'a EmbeddedShots,
        anchors: &'a mut AnchorRecorder,
        warnings: &'a mut Warnings,
    ) -> Self {
        Self {
            doc,
            config,
            shots,
            anchors,
            warnings,
            linkify: true,
        }
    }

    /// Turns `http(s)://` URLs in body text into link annotations.
    pub fn with_linkify(mut self, linkify: bool) -> Self {
        self.linkify = linkify;
        self
    }

    /// Starts a page and draws every block in order. Returns the final cursor.
    pub fn draw_all(&mut self, blocks: &[LayoutBlock]) -> PageState {
        let mut state = PageState::begin(self.config, self.doc);
        for block in blocks {
            state = self.draw_block(state, block);
        }
        state
    }

    pub fn draw_block(&mut self, state: PageState, block: &LayoutBlock) -> PageState {
        match block {
            LayoutBlock::Title(text) => self.draw_title(state, text),
            LayoutBlock::Heading { text, level, options } => self.draw_heading(state, text, *level, options),
            LayoutBlock::Paragraph { text, style } => self.draw_paragraph(state, text, *style),
            LayoutBlock::Meta(text) => self.draw_meta(state, text),
            LayoutBlock::BulletList(items) => self.draw_bullets(state, items),
            LayoutBlock::Figure(id) => self.draw_figure(state, id),
        }
    }

    fn style(&self, font: StandardFont, size: f32, muted: bool) -> TextStyle {
        let color = if muted { self.config.muted_color } else { self.config.text_color };
        TextStyle::new(font, size, color)
    }

    fn draw_title(&mut self, state: PageState, text: &str) -> PageState {
        let config = self.config;
        let style = self.style(StandardFont::HelveticaBold, config.title_font_size, false);
        let lines = wrap_text(text, &style.font, style.size, config.content_width());
        let line_height = config.line_height(style.size);
        let keep = config.keep_next_lines as f32 * config.body_line_height();

        let state = state.ensure_atomic_group(lines.len() as f32 * line_height + keep, config, self.doc);
        self.anchors.record(Anchor::new(text.trim(), 1, state.page, state.y));

        let mut state = state;
        for line in &lines {
            self.doc
                .draw_text(state.page, config.content_left(), baseline(state.y, line_height, style.size), line, &style);
            state = state.advance(line_height);
        }

        let rule_y = state.y + config.heading_space_after;
        self.doc.draw_line(
            state.page,
            (config.content_left(), rule_y),
            (config.content_right(), rule_y),
            TITLE_RULE_WIDTH,
            config.rule_color,
        );
        state.advance(config.heading_space_after * 2.0 + config.block_spacing)
    }

    fn draw_heading(&mut self, state: PageState, text: &str, level: HeadingLevel, options: &HeadingOptions) -> PageState {
        let config = self.config;
        let size = match level {
            HeadingLevel::Section => config.section_font_size,
            HeadingLevel::Subsection => config.subsection_font_size,
        };
        let style = self.style(StandardFont::HelveticaBold, size, false);
        let lines = wrap_text(text, &style.font, size, config.content_width());
        let line_height = config.line_height(size);
        let keep_lines = options.keep_next_lines.unwrap_or(config.keep_next_lines);

        let mut state = state;
        if options.page_break_before && !state.is_at_top(config) {
            state = state.next_page(config, self.doc);
        }

        let space_before = if state.is_at_top(config) { 0.0 } else { config.heading_space_before };
        let group = space_before
            + lines.len() as f32 * line_height
            + config.heading_space_after
            + keep_lines as f32 * config.body_line_height();
        state = state.ensure_atomic_group(group, config, self.doc);
        if !state.is_at_top(config) {
            state = state.advance(space_before);
        }

        self.anchors
            .record(Anchor::new(text.trim(), level.as_u8(), state.page, state.y));
        for line in &lines {
            self.doc
                .draw_text(state.page, config.content_left(), baseline(state.y, line_height, size), line, &style);
            state = state.advance(line_height);
        }
        state.advance(config.heading_space_after)
    }

    fn draw_paragraph(&mut self, state: PageState, text: &str, style: ParagraphStyle) -> PageState {
        let config = self.config;
        let style = match style {
            ParagraphStyle::Body => self.style(StandardFont::Helvetica, config.body_font_size, false),
            ParagraphStyle::Muted => self.style(StandardFont::Helvetica, config.meta_font_size, true),
            ParagraphStyle::Strong => self.style(StandardFont::HelveticaBold, config.body_font_size, false),
        };
        let wrapped = wrap_paragraphs(text, &style.font, style.size, config.content_width());
        if wrapped.is_empty() {
            return state;
        }
        let state = self.draw_wrapped(state, &wrapped, config.content_left(), &style);
        state.advance(config.block_spacing)
    }

    fn draw_meta(&mut self, state: PageState, text: &str) -> PageState {
        let config = self.config;
        let style = self.style(StandardFont::HelveticaOblique, config.meta_font_size, true);
        let wrapped = wrap_paragraphs(text, &style.font, style.size, config.content_width());
        if wrapped.is_empty() {
            return state;
        }
        let state = self.draw_wrapped(state, &wrapped, config.content_left(), &style);
        state.advance(config.paragraph_gap)
    }

    fn draw_bullets(&mut self, state: PageState, items: &[String]) -> PageState {
        let config = self.config;
        let style = self.style(StandardFont::Helvetica, config.body_font_size, false);
        let line_height = config.body_line_height();
        let text_x = config.content_left() + config.list_indent;
        let bullet_x = config.content_left() + (config.list_indent - text_width(BULLET, &style)) / 2.0;
        let width = config.content_width() - config.list_indent;

        let mut state = state;
        let mut drawn = 0;
        for item in items {
            let wrapped = wrap_paragraphs(item, &style.font, style.size, width);
            if wrapped.is_empty() {
                continue;
            }
            if drawn > 0 {
                state = state.advance(config.list_item_spacing);
            }
            // The bullet shares the first line's page.
            state = state.ensure_space(line_height, config, self.doc);
            self.doc
                .draw_text(state.page, bullet_x, baseline(state.y, line_height, style.size), BULLET, &style);
            state = self.draw_wrapped(state, &wrapped, text_x, &style);
            drawn += 1;
        }

        if drawn == 0 { state } else { state.advance(config.block_spacing) }
    }

    fn draw_figure(&mut self, state: PageState, id: &ShotId) -> PageState {
        let shots = self.shots;
        match shots.get(id) {
            Some(shot) => self.draw_embedded(state, shot),
            None => self.draw_placeholder(state, id),
        }
    }

    fn caption_lines(&self, shot: &EmbeddedShot) -> (Vec<String>, Vec<String>) {
        let config = self.config;
        let size = config.caption_font_size;
        let title = wrap_text(&shot.caption_title(), &StandardFont::HelveticaBold, size, config.content_width());
        let note = shot
            .caption
            .as_deref()
            .map(|note| wrap_text(note, &StandardFont::Helvetica, size, config.content_width()))
            .unwrap_or_default();
        (title, note)
    }

    fn draw_embedded(&mut self, state: PageState, shot: &EmbeddedShot) -> PageState {
        let config = self.config;
        let caption_height = config.line_height(config.caption_font_size);
        let (title_lines, note_lines) = self.caption_lines(shot);
        let chrome = config.figure_caption_gap + (title_lines.len() + note_lines.len()) as f32 * caption_height;

        // First pass against what is left here; second pass against a fresh page.
        let mut state = state;
        let size = match size_for_current_page(shot.intrinsic, chrome, state.remaining(config), config) {
            Some(size) => size,
            None => {
                if !state.is_at_top(config) {
                    debug!("Figure {} does not fit on {}; moving to a new page.", shot.figure, state.page);
                    state = state.next_page(config, self.doc);
                }
                size_for_fresh_page(shot.intrinsic, chrome, config)
            }
        };
        state = state.ensure_atomic_group(size.height + chrome, config, self.doc);

        let x = config.content_left() + (config.content_width() - size.width) / 2.0;
        self.doc
            .draw_image(state.page, &shot.image, Rect::new(x, state.y, size.width, size.height));
        state = state.advance(size.height + config.figure_caption_gap);

        let title_style = self.style(StandardFont::HelveticaBold, config.caption_font_size, false);
        let note_style = self.style(StandardFont::Helvetica, config.caption_font_size, true);
        let captions = title_lines
            .iter()
            .map(|line| (line, &title_style))
            .chain(note_lines.iter().map(|line| (line, &note_style)));
        for (line, style) in captions {
            draw_centered(self.doc, state.page, config, state.y, caption_height, line, style);
            state = state.advance(caption_height);
        }
        state.advance(config.block_spacing)
    }

    fn draw_placeholder(&mut self, state: PageState, id: &ShotId) -> PageState {
        if !self.shots.is_failed(id) {
            self.warnings
                .push(format!("Screenshot {} is unavailable; a placeholder was drawn instead.", id));
        }
        let text = format!("[Screenshot {} unavailable]", id);
        let config = self.config;
        let style = self.style(StandardFont::HelveticaOblique, config.caption_font_size, true);
        let line_height = config.line_height(style.size);
        let state = state.ensure_space(line_height, config, self.doc);
        draw_centered(self.doc, state.page, config, state.y, line_height, &text, &style);
        state.advance(line_height + config.block_spacing)
    }

    /// Draws wrapped lines at `x`, breaking pages between lines as needed.
    fn draw_wrapped(&mut self, state: PageState, wrapped: &WrappedText, x: f32, style: &TextStyle) -> PageState {
        let config = self.config;
        let line_height = config.line_height(style.size);
        let linked = self.linkify.then(|| LinkedLines::new(&wrapped.lines));
        let mut state = state;

        for (index, line) in wrapped.lines.iter().enumerate() {
            if line.gap_before && !state.is_at_top(config) {
                state = state.advance(config.paragraph_gap);
            }
            state = state.ensure_space(line_height, config, self.doc);
            let y = baseline(state.y, line_height, style.size);
            match &linked {
                Some(linked) => self.draw_linked_line(state, x, line_height, linked.segments(index, &line.text), style),
                None => self.doc.draw_text(state.page, x, y, &line.text, style),
            }
            state = state.advance(line_height);
        }
        state
    }

    fn draw_linked_line(&mut self, state: PageState, x: f32, line_height: f32, segments: Vec<Segment<'_>>, style: &TextStyle) {
        let y = baseline(state.y, line_height, style.size);
        let link_style = TextStyle::new(style.font, style.size, self.config.link_color);
        let mut cursor = x;
        for segment in segments {
            let width = style.font.text_width(segment.text, style.size);
            match segment.link {
                Some(uri) => {
                    self.doc.draw_text(state.page, cursor, y, segment.text, &link_style);
                    self.doc
                        .link_to_uri(state.page, Rect::new(cursor, state.y, width, line_height), uri);
                }
                None => self.doc.draw_text(state.page, cursor, y, segment.text, style),
            }
            cursor += width;
        }
    }
}
