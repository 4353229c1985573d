use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image could not be decoded: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image could not be re-encoded: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Image has no pixels ({0}x{1})")]
    EmptyImage(u32, u32),
}
