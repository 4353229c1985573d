//! The page cursor threaded through the drawing pass.
//!
//! A [`PageState`] is a plain value: every drawing routine takes the current
//! state and returns the next one. Page breaks go through a [`PageSink`],
//! which is the only thing allowed to create pages during layout.

use crate::algorithms::pagination::{EPSILON, check_fit};
use crate::config::LayoutConfig;
use log::debug;
use shotdoc_types::PageHandle;

/// Creates pages on demand while content flows.
pub trait PageSink {
    /// Appends a blank page and returns its identity.
    fn start_page(&mut self) -> PageHandle;
}

/// The page currently being written and the cursor position on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageState {
    pub page: PageHandle,
    /// Distance from the top of the page to the next free line.
    pub y: f32,
}

impl PageState {
    /// Places the cursor at the top of the content area of `page`.
    pub fn at_top(page: PageHandle, config: &LayoutConfig) -> Self {
        Self {
            page,
            y: config.content_top(),
        }
    }

    /// Starts the first page of a flow.
    pub fn begin<S: PageSink + ?Sized>(config: &LayoutConfig, sink: &mut S) -> Self {
        Self::at_top(sink.start_page(), config)
    }

    pub fn remaining(&self, config: &LayoutConfig) -> f32 {
        (config.content_bottom() - self.y).max(0.0)
    }

    pub fn is_at_top(&self, config: &LayoutConfig) -> bool {
        self.y <= config.content_top() + EPSILON
    }

    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    #[must_use]
    pub fn next_page<S: PageSink + ?Sized>(self, config: &LayoutConfig, sink: &mut S) -> Self {
        Self::begin(config, sink)
    }

    /// Makes sure `height` can be consumed without crossing the bottom margin,
    /// starting a new page otherwise.
    ///
    /// A fresh page is never abandoned: content taller than a whole page is
    /// drawn from the top and allowed to overflow.
    #[must_use]
    pub fn ensure_space<S: PageSink + ?Sized>(self, height: f32, config: &LayoutConfig, sink: &mut S) -> Self {
        let analysis = check_fit(self.y, height, config.content_bottom());
        if analysis.should_break && !self.is_at_top(config) {
            self.next_page(config, sink)
        } else {
            self
        }
    }

    /// Keeps a group of lines together: if the whole group does not fit in the
    /// remaining space, the group moves to a new page as a unit.
    ///
    /// After the call, `remaining(config) >= height` for any group no taller
    /// than the content area.
    #[must_use]
    pub fn ensure_atomic_group<S: PageSink + ?Sized>(self, height: f32, config: &LayoutConfig, sink: &mut S) -> Self {
        let analysis = check_fit(self.y, height, config.content_bottom());
        if !analysis.should_break {
            return self;
        }
        if height > config.content_height() + EPSILON {
            debug!(
                "Group of height {:.2} exceeds page content height {:.2}; it will overflow.",
                height,
                config.content_height()
            );
        }
        if self.is_at_top(config) {
            self
        } else {
            debug!(
                "Moving {:.2}pt group to a new page ({:.2}pt left on {}).",
                height, analysis.remaining_height, self.page
            );
            self.next_page(config, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CountingSink;

    #[test]
    fn ensure_space_keeps_page_when_content_fits() {
        let config = LayoutConfig::default();
        let mut sink = CountingSink::default();
        let state = PageState::begin(&config, &mut sink).advance(100.0);
        let next = state.ensure_space(50.0, &config, &mut sink);
        assert_eq!(next, state);
        assert_eq!(sink.pages.len(), 1);
    }

    #[test]
    fn ensure_space_breaks_at_bottom_margin() {
        let config = LayoutConfig::default();
        let mut sink = CountingSink::default();
        let start = PageState::begin(&config, &mut sink);
        let near_bottom = PageState {
            y: config.content_bottom() - 10.0,
            ..start
        };
        let next = near_bottom.ensure_space(config.body_line_height(), &config, &mut sink);
        assert_ne!(next.page, start.page);
        assert_eq!(next.y, config.content_top());
        assert_eq!(sink.pages.len(), 2);
    }

    #[test]
    fn fresh_page_is_never_abandoned() {
        let config = LayoutConfig::default();
        let mut sink = CountingSink::default();
        let start = PageState::begin(&config, &mut sink);
        let huge = config.content_height() * 2.0;
        assert_eq!(start.ensure_space(huge, &config, &mut sink), start);
        assert_eq!(start.ensure_atomic_group(huge, &config, &mut sink), start);
        assert_eq!(sink.pages.len(), 1);
    }

    #[test]
    fn atomic_group_always_has_room_afterwards() {
        let config = LayoutConfig::default();
        let mut sink = CountingSink::default();
        let start = PageState::begin(&config, &mut sink);
        let content = config.content_height();

        for step in 0..40 {
            let y = config.content_top() + content * step as f32 / 40.0;
            for height in [1.0, 15.4, 80.0, content / 2.0, content] {
                let state = PageState { y, ..start };
                let next = state.ensure_atomic_group(height, &config, &mut sink);
                assert!(
                    next.remaining(&config) + 0.01 >= height,
                    "y = {y}, height = {height}, remaining = {}",
                    next.remaining(&config)
                );
            }
        }
    }
}
