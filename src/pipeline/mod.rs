//! Document generation pipeline.
//!
//! - [`GeneratorBuilder`]: fluent builder for a configured [`DocumentGenerator`]
//! - [`DocumentGenerator`]: runs one build per request
//! - [`build_document`]: one-shot build with the default layout
//!
//! # Example
//!
//! ```ignore
//! use shotdoc::{BuildRequest, GeneratorBuilder};
//!
//! let generator = GeneratorBuilder::new().with_config_file("layout.json")?.build()?;
//! let request = BuildRequest::from_json(&std::fs::read_to_string("request.json")?)?;
//! let result = generator.generate_to_file(&request, "guide.pdf")?;
//! ```

mod builder;
mod orchestrator;

pub use builder::GeneratorBuilder;
pub use orchestrator::{DocumentGenerator, build_document};
