//! Screenshot assets for the shotdoc pipeline.
//!
//! Screenshots arrive as base64 data URLs. This crate decodes them and
//! prepares the pixels for embedding:
//!
//! - [`decode_data_url`]: splits the media type from the payload and decodes it
//! - [`prepare_image`]: validates the image and optionally downsizes and
//!   re-encodes it, falling back to the original bytes on any failure
//!
//! Undecodable images are reported as [`ResourceError`] so the caller can skip
//! the shot and record a warning.

mod data_url;
mod error;
mod raster;

pub use data_url::{DataUrl, decode_data_url};
pub use error::ResourceError;
pub use raster::{ImagePayload, PreparedImage, RasterFormat, RasterOptions, prepare_image};

/// Decodes a data URL and prepares the image it contains.
pub fn load_data_url(input: &str, options: Option<&RasterOptions>) -> Result<PreparedImage, ResourceError> {
    let data = decode_data_url(input)?;
    prepare_image(&data.bytes, options)
}
