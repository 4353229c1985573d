//! Intermediate Document Format (IDF)
//!
//! The flat, ordered block list produced from parsed content and consumed by
//! the drawing pass. Blocks are immutable once built; the drawing pass walks
//! them strictly in order.

use shotdoc_types::ShotId;

/// Level of a section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    Section,
    Subsection,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::Section => 1,
            HeadingLevel::Subsection => 2,
        }
    }
}

/// Pagination hints attached to a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadingOptions {
    /// Start the heading on a fresh page unless the cursor is already at the top.
    pub page_break_before: bool,
    /// Body lines that must fit below the heading on the same page.
    /// `None` uses the configured default.
    pub keep_next_lines: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    #[default]
    Body,
    /// Smaller, gray text for notes and preambles.
    Muted,
    Strong,
}

/// Represents a block-level element of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    /// The document title. Recorded as a top-level anchor.
    Title(String),
    Heading {
        text: String,
        level: HeadingLevel,
        options: HeadingOptions,
    },
    /// Free text; blank lines separate paragraphs, single newlines force a break.
    Paragraph { text: String, style: ParagraphStyle },
    /// A small secondary line such as a date or attendee list.
    Meta(String),
    BulletList(Vec<String>),
    /// A reference to an embedded screenshot.
    Figure(ShotId),
}

impl LayoutBlock {
    pub fn title(text: impl Into<String>) -> Self {
        LayoutBlock::Title(text.into())
    }

    pub fn section(text: impl Into<String>) -> Self {
        LayoutBlock::Heading {
            text: text.into(),
            level: HeadingLevel::Section,
            options: HeadingOptions::default(),
        }
    }

    pub fn subsection(text: impl Into<String>) -> Self {
        LayoutBlock::Heading {
            text: text.into(),
            level: HeadingLevel::Subsection,
            options: HeadingOptions::default(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        LayoutBlock::Paragraph {
            text: text.into(),
            style: ParagraphStyle::Body,
        }
    }

    pub fn styled_paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        LayoutBlock::Paragraph {
            text: text.into(),
            style,
        }
    }

    pub fn meta(text: impl Into<String>) -> Self {
        LayoutBlock::Meta(text.into())
    }

    pub fn figure(id: impl Into<ShotId>) -> Self {
        LayoutBlock::Figure(id.into())
    }

    /// Returns `true` for blocks that record a table-of-contents anchor.
    pub fn is_anchor(&self) -> bool {
        matches!(self, LayoutBlock::Title(_) | LayoutBlock::Heading { .. })
    }

    /// The referenced screenshot, if this is a figure.
    pub fn shot(&self) -> Option<&ShotId> {
        match self {
            LayoutBlock::Figure(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_titles_and_headings_are_anchors() {
        assert!(LayoutBlock::title("Doc").is_anchor());
        assert!(LayoutBlock::subsection("Step").is_anchor());
        assert!(!LayoutBlock::paragraph("text").is_anchor());
        assert!(!LayoutBlock::figure("shot1").is_anchor());
    }

    #[test]
    fn figure_exposes_its_shot() {
        let block = LayoutBlock::figure("shot7");
        assert_eq!(block.shot().map(ShotId::as_str), Some("shot7"));
        assert_eq!(LayoutBlock::meta("x").shot(), None);
    }
}
