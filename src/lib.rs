//! shotdoc: paginated PDF guides and meeting summaries from generated
//! content and screenshots.
//!
//! A build runs in fixed stages:
//!
//! 1. the generated text is repaired and parsed ([`shotdoc_content`]),
//! 2. screenshots are decoded and embedded with figure numbers ([`embed`]),
//! 3. layout blocks are drawn in order onto content pages ([`draw`]),
//! 4. the cover and table of contents are inserted in front ([`cover`], [`toc`]),
//! 5. footers, outline and metadata are added and the PDF is serialized.
//!
//! Entry points are [`build_document`] and [`GeneratorBuilder`].

pub mod appendix;
pub mod cover;
pub mod draw;
pub mod embed;
pub mod error;
pub mod footer;
pub mod options;
pub mod pipeline;
pub mod toc;
mod warnings;

#[cfg(test)]
mod test_support;

pub use error::PipelineError;
pub use options::{
    BuildRequest, BuildResult, BuildSummary, DocumentOptions, ExportOptions, ImageFormat, ImageOptions, ShotRecord,
};
pub use pipeline::{DocumentGenerator, GeneratorBuilder, build_document};
pub use warnings::Warnings;

pub use shotdoc_content::SchemaType;
pub use shotdoc_layout::LayoutConfig;
