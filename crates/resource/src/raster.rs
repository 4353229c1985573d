use crate::error::ResourceError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use log::{debug, warn};
use std::borrow::Cow;

/// Target encoding for re-encoded screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    #[default]
    Jpeg,
    Png,
}

/// Downsizing and re-encoding settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub format: RasterFormat,
    /// JPEG quality, 1..=100.
    pub quality: u8,
    /// Images wider than this are scaled down; narrower ones are left alone.
    pub max_width: Option<u32>,
    /// Requested progressive JPEG output. The encoder writes baseline JPEG.
    pub progressive: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            format: RasterFormat::Jpeg,
            quality: 85,
            max_width: None,
            progressive: false,
        }
    }
}

impl RasterOptions {
    /// Converts a 0.0..=1.0 quality fraction to the encoder's 1..=100 scale.
    pub fn quality_from_fraction(fraction: f32) -> u8 {
        (fraction.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Pixel data in a form the PDF writer can embed directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// A JPEG stream embedded unchanged.
    Jpeg { data: Vec<u8>, components: u8 },
    /// 8-bit RGB samples, with 8-bit alpha when the image is not opaque.
    Pixels { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub payload: ImagePayload,
    /// `false` when the original bytes were used.
    pub reencoded: bool,
}

/// Validates and prepares screenshot bytes for embedding.
///
/// Bytes that do not decode as an image are an error. With `options`, the image
/// is downsized to `max_width` (never upscaled) and re-encoded; if that fails
/// for any reason the original bytes are embedded instead.
pub fn prepare_image(bytes: &[u8], options: Option<&RasterOptions>) -> Result<PreparedImage, ResourceError> {
    let source_format = image::guess_format(bytes).ok();
    let decoded = image::load_from_memory(bytes).map_err(ResourceError::Decode)?;
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceError::EmptyImage(width, height));
    }

    if let Some(options) = options {
        match reencode(&decoded, options) {
            Ok(prepared) => return Ok(prepared),
            Err(e) => warn!("{}; embedding the original {}x{} image.", e, width, height),
        }
    }

    Ok(from_original(bytes, source_format, &decoded))
}

fn reencode(image: &DynamicImage, options: &RasterOptions) -> Result<PreparedImage, ResourceError> {
    let resized = downsize(image, options.max_width);
    let (width, height) = resized.dimensions();

    match options.format {
        RasterFormat::Jpeg => {
            if options.progressive {
                debug!("Progressive JPEG requested; writing baseline JPEG.");
            }
            let rgb = resized.to_rgb8();
            let mut data = Vec::new();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut data, options.quality))
                .map_err(ResourceError::Encode)?;
            debug!(
                "Re-encoded {}x{} screenshot as JPEG (quality {}, {} bytes).",
                width,
                height,
                options.quality,
                data.len()
            );
            Ok(PreparedImage {
                width,
                height,
                payload: ImagePayload::Jpeg { data, components: 3 },
                reencoded: true,
            })
        }
        // Lossless target: the PDF stores flate-compressed samples either way.
        RasterFormat::Png => Ok(PreparedImage {
            width,
            height,
            payload: pixels_of(&resized),
            reencoded: true,
        }),
    }
}

fn downsize(image: &DynamicImage, max_width: Option<u32>) -> Cow<'_, DynamicImage> {
    match max_width {
        Some(max_width) if max_width > 0 && image.width() > max_width => {
            let scale = f64::from(max_width) / f64::from(image.width());
            let height = ((f64::from(image.height()) * scale).round() as u32).max(1);
            debug!(
                "Downsizing screenshot from {}x{} to {}x{}.",
                image.width(),
                image.height(),
                max_width,
                height
            );
            Cow::Owned(image.resize_exact(max_width, height, FilterType::Triangle))
        }
        _ => Cow::Borrowed(image),
    }
}

fn from_original(bytes: &[u8], format: Option<ImageFormat>, decoded: &DynamicImage) -> PreparedImage {
    let (width, height) = decoded.dimensions();
    let jpeg_components = match decoded.color() {
        ColorType::L8 => Some(1),
        ColorType::Rgb8 => Some(3),
        _ => None,
    };

    let payload = match (format, jpeg_components) {
        (Some(ImageFormat::Jpeg), Some(components)) => ImagePayload::Jpeg {
            data: bytes.to_vec(),
            components,
        },
        _ => pixels_of(decoded),
    };

    PreparedImage {
        width,
        height,
        payload,
        reencoded: false,
    }
}

fn pixels_of(image: &DynamicImage) -> ImagePayload {
    if !image.color().has_alpha() {
        return ImagePayload::Pixels {
            rgb: image.to_rgb8().into_raw(),
            alpha: None,
        };
    }

    let rgba = image.to_rgba8();
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(rgba.len() / 4);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }
    let opaque = alpha.iter().all(|&a| a == u8::MAX);
    ImagePayload::Pixels {
        rgb,
        alpha: if opaque { None } else { Some(alpha) },
    }
}
