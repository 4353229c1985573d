// Use a small epsilon to handle floating point inaccuracies
pub(crate) const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if a block fits in the remaining space.
///
/// * `cursor_y`: The current Y position, measured from the top of the page.
/// * `height`: The required height for the block.
/// * `bottom`: The lowest Y the block may reach (the top of the bottom margin).
pub fn check_fit(cursor_y: f32, height: f32, bottom: f32) -> BreakAnalysis {
    let available = (bottom - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: height > available + EPSILON,
        remaining_height: available,
    }
}

/// How many table-of-contents lines fit on the first and following pages.
///
/// The first page also carries the "Contents" heading, so it holds fewer lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocCapacity {
    pub first_page: usize,
    pub per_page: usize,
}

impl TocCapacity {
    /// * `content_height`: Usable height of a page.
    /// * `heading_block`: Height taken by the heading on the first page.
    /// * `line_height`: Height of one entry line.
    pub fn new(content_height: f32, heading_block: f32, line_height: f32) -> Self {
        let lines = |height: f32| ((height + EPSILON) / line_height).floor().max(1.0) as usize;
        Self {
            first_page: lines(content_height - heading_block),
            per_page: lines(content_height),
        }
    }

    /// Pages needed for `anchors` entries: `1 + ceil(max(0, anchors - first_page) / per_page)`.
    pub fn pages_needed(&self, anchors: usize) -> usize {
        1 + anchors.saturating_sub(self.first_page).div_ceil(self.per_page)
    }

    /// Entries drawn on the page at `page_index` within the table of contents.
    pub fn capacity_of(&self, page_index: usize) -> usize {
        if page_index == 0 { self.first_page } else { self.per_page }
    }
}
