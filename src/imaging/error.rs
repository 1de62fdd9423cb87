//! Error taxonomy for a single normalization call.
//!
//! - [`NormalizeError::Read`]: the input stream could not be read.
//! - [`NormalizeError::Decode`] / [`NormalizeError::EmptyImage`]: the bytes are
//!   not an image, or decode to nothing.
//! - [`TransformError`]: flattening, resizing or encoding failed.
//!
//! The `Display` text of these errors is what callers see in a failed
//! [`Outcome`](crate::normalizer::Outcome).

use image::ColorType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Failed to read image stream: {0}")]
    Read(#[from] std::io::Error),
    #[error("Image decoding error")]
    Decode(#[source] image::ImageError),
    #[error("Image decoding error")]
    EmptyImage,
    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Resize to {width}x{height} would produce an empty image")]
    EmptyResize { width: u32, height: u32 },
    #[error("Image of {width}x{height} exceeds the {max}px JPEG limit")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("Cannot crop {size}x{size} from a {width}x{height} image")]
    CropOutOfBounds { size: u32, width: u32, height: u32 },
    #[error("Unsupported pixel layout: {0:?}")]
    UnsupportedLayout(ColorType),
    #[error("JPEG encode failed: {0}")]
    Encode(#[source] image::ImageError),
}
