use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// A solid-color PNG of the given size as a data URL.
pub(crate) fn png_data_url(width: u32, height: u32) -> String {
    let image = RgbImage::from_pixel(width, height, Rgb([40, 120, 200]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode test png");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}
