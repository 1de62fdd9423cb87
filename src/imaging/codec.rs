//! Decoding raw bytes into an 8-bit raster, and encoding the result as JPEG.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Format sniffing + decode | `image::load_from_memory` |
//! | Bit-depth down-cast | `DynamicImage::into_{luma8,rgb8,rgba8}` |
//! | Encode | `image::codecs::jpeg::JpegEncoder` |
//!
//! After [`decode`] the raster is always one of `ImageLuma8`, `ImageRgb8` or
//! `ImageRgba8`. Gray+alpha is widened to RGBA so it goes through the same
//! alpha flattening as color images.

use super::error::{NormalizeError, TransformError};
use super::params::JPEG_QUALITY;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::sync::LazyLock;

/// Largest width or height a baseline JPEG can store.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// File extensions whose decoders are compiled into this build.
static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    [
        "jpg", "jpeg", "png", "tif", "tiff", "webp", "gif", "bmp",
    ]
    .into_iter()
    .filter(|ext| image::ImageFormat::from_extension(ext).is_some_and(|f| f.reading_enabled()))
    .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Decode `raw` into an 8-bit-per-channel raster, keeping any alpha channel.
///
/// The codec is detected from the content alone.
pub fn decode(raw: &[u8]) -> Result<DynamicImage, NormalizeError> {
    let img = image::load_from_memory(raw).map_err(NormalizeError::Decode)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(NormalizeError::EmptyImage);
    }
    Ok(to_8bit(img))
}

fn to_8bit(img: DynamicImage) -> DynamicImage {
    let color = img.color();
    match (color.channel_count(), color.has_alpha()) {
        (1, _) => DynamicImage::ImageLuma8(img.into_luma8()),
        (_, true) => DynamicImage::ImageRgba8(img.into_rgba8()),
        _ => DynamicImage::ImageRgb8(img.into_rgb8()),
    }
}

/// Fail early for sizes the JPEG encoder cannot represent.
pub fn check_jpeg_bounds(width: u32, height: u32) -> Result<(), TransformError> {
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(TransformError::TooLarge {
            width,
            height,
            max: MAX_JPEG_DIMENSION,
        });
    }
    Ok(())
}

/// Encode a grayscale or RGB raster as JPEG at [`JPEG_QUALITY`].
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {}
        other => return Err(TransformError::UnsupportedLayout(other.color())),
    }
    check_jpeg_bounds(img.width(), img.height())?;

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(TransformError::Encode)?;
    Ok(bytes)
}
