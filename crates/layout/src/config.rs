use crate::LayoutError;
use serde::Deserialize;
use shotdoc_types::{Color, Margins, Size};

/// A4 portrait in points.
pub const A4: Size = Size {
    width: 595.28,
    height: 841.89,
};

/// Page geometry, typography and spacing used by every drawing routine.
///
/// Deserializes from camelCase JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub page_size: Size,
    /// The footer is drawn inside the bottom margin.
    pub margins: Margins,

    pub body_font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
    pub title_font_size: f32,
    pub section_font_size: f32,
    pub subsection_font_size: f32,
    pub meta_font_size: f32,
    pub caption_font_size: f32,
    pub footer_font_size: f32,
    pub cover_title_font_size: f32,

    /// Gap between paragraphs of one wrapped text block.
    pub paragraph_gap: f32,
    /// Space after paragraphs, lists and figures.
    pub block_spacing: f32,
    /// Space above a heading, skipped at the top of a page.
    pub heading_space_before: f32,
    pub heading_space_after: f32,
    pub list_indent: f32,
    pub list_item_spacing: f32,

    /// Body lines that must fit under a heading. Headings that would be
    /// stranded at the bottom of a page move to the next one.
    pub keep_next_lines: u32,

    /// Largest figure height as a fraction of the content height.
    pub figure_max_height_ratio: f32,
    /// A figure is never shrunk below this height to squeeze onto the current page.
    pub figure_min_height: f32,
    /// Gap between a figure image and its caption.
    pub figure_caption_gap: f32,

    pub toc_indent: f32,
    pub cover_image_max_height_ratio: f32,
    /// Distance from the bottom of the content area to the footer divider.
    pub footer_offset: f32,

    pub text_color: Color,
    pub muted_color: Color,
    pub link_color: Color,
    pub rule_color: Color,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: A4,
            margins: Margins::new(56.0, 56.0, 64.0, 56.0),
            body_font_size: 11.0,
            line_height_ratio: 1.4,
            title_font_size: 22.0,
            section_font_size: 16.0,
            subsection_font_size: 13.0,
            meta_font_size: 9.5,
            caption_font_size: 9.5,
            footer_font_size: 8.5,
            cover_title_font_size: 30.0,
            paragraph_gap: 5.0,
            block_spacing: 8.0,
            heading_space_before: 10.0,
            heading_space_after: 4.0,
            list_indent: 16.0,
            list_item_spacing: 2.0,
            keep_next_lines: 2,
            figure_max_height_ratio: 0.6,
            figure_min_height: 140.0,
            figure_caption_gap: 6.0,
            toc_indent: 18.0,
            cover_image_max_height_ratio: 0.45,
            footer_offset: 20.0,
            text_color: Color::gray(0x22),
            muted_color: Color::gray(0x6b),
            link_color: Color::rgb(0x1a, 0x5f, 0xb4),
            rule_color: Color::gray(0xc8),
        }
    }
}

impl LayoutConfig {
    /// Rejects configurations that leave no room to draw.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(LayoutError::EmptyContentArea(self.content_width(), self.content_height()));
        }
        if self.body_font_size <= 0.0 {
            return Err(LayoutError::InvalidSetting(
                "bodyFontSize",
                format!("must be positive, got {}", self.body_font_size),
            ));
        }
        if self.line_height_ratio < 1.0 {
            return Err(LayoutError::InvalidSetting(
                "lineHeightRatio",
                format!("must be at least 1.0, got {}", self.line_height_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.figure_max_height_ratio) || self.figure_max_height_ratio == 0.0 {
            return Err(LayoutError::InvalidSetting(
                "figureMaxHeightRatio",
                format!("must be in (0, 1], got {}", self.figure_max_height_ratio),
            ));
        }
        let tallest_line = self.line_height(self.section_font_size.max(self.title_font_size));
        if tallest_line > self.content_height() {
            return Err(LayoutError::InvalidSetting(
                "titleFontSize",
                format!("a {:.1}pt line does not fit in the content area", tallest_line),
            ));
        }
        Ok(())
    }

    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_right(&self) -> f32 {
        self.page_size.width - self.margins.right
    }

    pub fn content_top(&self) -> f32 {
        self.margins.top
    }

    pub fn content_bottom(&self) -> f32 {
        self.page_size.height - self.margins.bottom
    }

    pub fn content_width(&self) -> f32 {
        self.page_size.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> f32 {
        self.page_size.height - self.margins.vertical()
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_ratio
    }

    pub fn body_line_height(&self) -> f32 {
        self.line_height(self.body_font_size)
    }

    pub fn max_figure_height(&self) -> f32 {
        self.content_height() * self.figure_max_height_ratio
    }
}
