use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Page content area is empty: {0:.2} x {1:.2} points after margins.")]
    EmptyContentArea(f32, f32),
    #[error("Invalid layout setting '{0}': {1}")]
    InvalidSetting(&'static str, String),
}

pub mod algorithms;
pub mod config;
pub mod figure;
pub mod flow;
pub mod fonts;
pub mod text;

pub use self::config::LayoutConfig;
pub use self::figure::{fit_within, size_for_current_page, size_for_fresh_page};
pub use self::flow::{PageSink, PageState};
pub use self::fonts::{FontMetrics, StandardFont, encode_win_ansi};
pub use self::text::wrapper::{LineEnd, WrappedLine, WrappedText, fit_with_ellipsis, wrap_paragraphs, wrap_text};

// Re-export geometry types so downstream crates agree on one definition.
pub use shotdoc_types::geometry::{Margins, Rect, Size};

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod text_test;
