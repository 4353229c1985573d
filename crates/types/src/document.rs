use crate::ids::PageHandle;

/// A heading position recorded while laying out content.
///
/// Anchors drive both the table of contents and the document outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// The heading text as drawn.
    pub title: String,
    /// Heading level (1 = section, 2 = subsection).
    pub level: u8,
    /// The page the heading was drawn on.
    pub page: PageHandle,
    /// Distance of the heading's top edge from the top of the page.
    pub y: f32,
}

impl Anchor {
    pub fn new(title: impl Into<String>, level: u8, page: PageHandle, y: f32) -> Self {
        Self {
            title: title.into(),
            level: level.clamp(1, 2),
            page,
            y,
        }
    }

    pub fn is_nested(&self) -> bool {
        self.level > 1
    }
}
