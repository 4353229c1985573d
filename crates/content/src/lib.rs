//! From model output to layout blocks.
//!
//! Generated content is supposed to be JSON in one of two shapes, but often
//! arrives wrapped in code fences, with typographic quotes or with trailing
//! commas. [`lenient::parse_lenient`] repairs what it can; [`model::build_model`]
//! maps the result onto [`LayoutBlock`](shotdoc_idf::LayoutBlock)s, falling
//! back to the raw text when the content cannot be understood.

pub mod lenient;
pub mod model;
pub mod schema;

pub use lenient::{LenientParse, RepairStep, parse_lenient};
pub use model::{DocumentModel, FALLBACK_PREAMBLE, build_model};
pub use schema::{MeetingSummary, SchemaType, Tutorial};
