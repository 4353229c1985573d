pub mod color;
pub mod document;
pub mod geometry;
pub mod ids;

pub use color::Color;
pub use document::Anchor;
pub use geometry::{Margins, Rect, Size};
pub use ids::{FigureNumber, PageHandle, ShotId};
