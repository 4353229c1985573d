//! Two-pass sizing of screenshots.
//!
//! The first pass tries to fit the figure into what is left of the current
//! page. If that would shrink it below the configured minimum, the caller
//! starts a new page and the second pass sizes it against a full page.

use crate::algorithms::pagination::EPSILON;
use crate::config::LayoutConfig;
use shotdoc_types::Size;

/// Scales `intrinsic` down to fit `max_width` x `max_height`, preserving the
/// aspect ratio. Never scales up.
pub fn fit_within(intrinsic: Size, max_width: f32, max_height: f32) -> Size {
    if intrinsic.is_empty() {
        return Size::zero();
    }
    let scale = (max_width / intrinsic.width)
        .min(max_height / intrinsic.height)
        .min(1.0)
        .max(0.0);
    intrinsic.scaled(scale)
}

/// First pass: the image size to use on the current page, or `None` when the
/// figure should move to a new page.
///
/// * `intrinsic`: The image size in points at 1:1.
/// * `chrome_height`: Height of the caption lines and gaps drawn with the image.
/// * `remaining`: Space left on the current page.
pub fn size_for_current_page(intrinsic: Size, chrome_height: f32, remaining: f32, config: &LayoutConfig) -> Option<Size> {
    let natural = fit_within(intrinsic, config.content_width(), config.max_figure_height());
    let available = remaining - chrome_height;

    if natural.height <= available + EPSILON {
        return Some(natural);
    }
    if available >= config.figure_min_height {
        return Some(fit_within(intrinsic, config.content_width(), available));
    }
    None
}

/// Second pass: the image size on an empty page.
pub fn size_for_fresh_page(intrinsic: Size, chrome_height: f32, config: &LayoutConfig) -> Size {
    let max_height = config
        .max_figure_height()
        .min(config.content_height() - chrome_height)
        .max(1.0);
    fit_within(intrinsic, config.content_width(), max_height)
}
