//! The per-image normalization boundary.
//!
//! A [`Normalizer`] is configured once and then called per image:
//!
//! ```text
//! bytes → decode → flatten alpha → (resize?) → encode JPEG → Outcome
//! ```
//!
//! Inside, every step returns `Result<_, NormalizeError>` and failures travel
//! with `?`. [`Normalizer::process`] is the one place they are turned into a
//! failed [`Outcome`], so a call always returns and never carries partial
//! output next to an error. Panics are not caught.
//!
//! The normalizer holds nothing but its configuration, so it is `Copy`,
//! `Send` and `Sync`; fan calls out across threads however the caller likes.

use crate::config::{ConfigError, ResizeConfig};
use crate::imaging::calculations::should_resize;
use crate::imaging::{NormalizeError, ResizeMode, alpha, codec, resize};
use std::io::Read;
use tracing::debug;

/// A successfully normalized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// JPEG-encoded output.
    pub bytes: Vec<u8>,
    /// Output dimensions (after resize).
    pub width: u32,
    pub height: u32,
    /// Dimensions after alpha flattening, before resize.
    pub original_width: u32,
    pub original_height: u32,
}

/// Positional view of an [`Outcome`]:
/// `(encoded_image, width, height, original_width, original_height, error_message)`.
pub type OutcomeParts = (
    Option<Vec<u8>>,
    Option<u32>,
    Option<u32>,
    Option<u32>,
    Option<u32>,
    Option<String>,
);

/// Result of one [`Normalizer::process`] call: an image or an error message, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Normalized(NormalizedImage),
    Failed { message: String },
}

impl Outcome {
    pub fn is_normalized(&self) -> bool {
        matches!(self, Outcome::Normalized(_))
    }

    pub fn image(&self) -> Option<&NormalizedImage> {
        match self {
            Outcome::Normalized(image) => Some(image),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Normalized(_) => None,
            Outcome::Failed { message } => Some(message),
        }
    }

    /// Flatten into the six positional fields. Exactly one of the first and
    /// last is `Some`; the dimensions are `Some` only alongside the image.
    pub fn into_parts(self) -> OutcomeParts {
        match self {
            Outcome::Normalized(img) => (
                Some(img.bytes),
                Some(img.width),
                Some(img.height),
                Some(img.original_width),
                Some(img.original_height),
                None,
            ),
            Outcome::Failed { message } => (None, None, None, None, None, Some(message)),
        }
    }
}

impl From<Result<NormalizedImage, NormalizeError>> for Outcome {
    fn from(result: Result<NormalizedImage, NormalizeError>) -> Self {
        match result {
            Ok(image) => Outcome::Normalized(image),
            Err(err) => Outcome::Failed {
                message: err.to_string(),
            },
        }
    }
}

/// Decodes, flattens, resizes and re-encodes images under a fixed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    target_size: u32,
    resize_mode: ResizeMode,
    resize_only_if_bigger: bool,
}

impl Normalizer {
    /// `target_size` is not validated here: a zero target fails per call
    /// rather than at construction.
    pub fn new(target_size: u32, resize_mode: ResizeMode, resize_only_if_bigger: bool) -> Self {
        Self {
            target_size,
            resize_mode,
            resize_only_if_bigger,
        }
    }

    /// Build from a textual resize mode (`"no"`, `"keep_ratio"`, `"center_crop"`, `"border"`).
    pub fn from_options(
        target_size: u32,
        resize_mode: &str,
        resize_only_if_bigger: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            target_size,
            resize_mode.parse()?,
            resize_only_if_bigger,
        ))
    }

    pub fn from_config(config: &ResizeConfig) -> Self {
        Self::new(
            config.image_size,
            config.resize_mode,
            config.resize_only_if_bigger,
        )
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    pub fn resize_only_if_bigger(&self) -> bool {
        self.resize_only_if_bigger
    }

    /// Normalize one encoded image. Never fails; errors come back as [`Outcome::Failed`].
    pub fn process(&self, raw: &[u8]) -> Outcome {
        self.try_process(raw).into()
    }

    /// Read `reader` to the end, then [`process`](Self::process) the bytes.
    pub fn process_reader(&self, mut reader: impl Read) -> Outcome {
        let mut raw = Vec::new();
        match reader.read_to_end(&mut raw) {
            Ok(_) => self.process(&raw),
            Err(err) => Outcome::from(Err::<NormalizedImage, _>(NormalizeError::Read(err))),
        }
    }

    /// The typed pipeline behind [`process`](Self::process).
    pub fn try_process(&self, raw: &[u8]) -> Result<NormalizedImage, NormalizeError> {
        let img = alpha::remove_alpha(codec::decode(raw)?);
        let (original_width, original_height) = (img.width(), img.height());

        let img = if should_resize(
            self.resize_mode,
            (original_width, original_height),
            self.target_size,
            self.resize_only_if_bigger,
        ) {
            resize::apply(self.resize_mode, img, self.target_size)?
        } else {
            img
        };

        let (width, height) = (img.width(), img.height());
        let bytes = codec::encode_jpeg(&img)?;
        debug!(
            original = format!("{original_width}x{original_height}"),
            output = format!("{width}x{height}"),
            mode = %self.resize_mode,
            jpeg_size = bytes.len(),
            "Image normalized"
        );

        Ok(NormalizedImage {
            bytes,
            width,
            height,
            original_width,
            original_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn rgb_png(width: u32, height: u32) -> Vec<u8> {
        png_bytes(&DynamicImage::ImageRgb8(RgbImage::from_fn(
            width,
            height,
            |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 64]),
        )))
    }

    #[test]
    fn from_options_parses_mode() {
        let n = Normalizer::from_options(128, "center_crop", true).unwrap();
        assert_eq!(n.target_size(), 128);
        assert_eq!(n.resize_mode(), ResizeMode::CenterCrop);
        assert!(n.resize_only_if_bigger());
    }

    #[test]
    fn from_options_rejects_unknown_mode() {
        let err = Normalizer::from_options(128, "squash", false).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownResizeMode(_)));
    }

    #[test]
    fn from_options_allows_zero_target() {
        assert!(Normalizer::from_options(0, "border", false).is_ok());
    }

    #[test]
    fn from_config_copies_fields() {
        let config = ResizeConfig {
            image_size: 64,
            resize_mode: ResizeMode::KeepRatio,
            resize_only_if_bigger: true,
        };
        assert_eq!(
            Normalizer::from_config(&config),
            Normalizer::new(64, ResizeMode::KeepRatio, true)
        );
    }

    #[test]
    fn keep_ratio_reports_both_dimension_sets() {
        let n = Normalizer::new(256, ResizeMode::KeepRatio, false);
        let img = n.try_process(&rgb_png(100, 200)).unwrap();
        assert_eq!((img.width, img.height), (256, 512));
        assert_eq!((img.original_width, img.original_height), (100, 200));
    }

    #[test]
    fn mode_none_passes_through_dimensions() {
        let n = Normalizer::new(16, ResizeMode::None, false);
        let img = n.try_process(&rgb_png(90, 45)).unwrap();
        assert_eq!((img.width, img.height), (90, 45));
    }

    #[test]
    fn only_if_bigger_skips_small_images() {
        let n = Normalizer::new(256, ResizeMode::CenterCrop, true);
        let img = n.try_process(&rgb_png(300, 200)).unwrap();
        assert_eq!((img.width, img.height), (300, 200));
    }

    #[test]
    fn transparent_pixels_flatten_to_white() {
        let rgba = RgbaImage::from_fn(16, 16, |x, _| {
            if x < 8 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let n = Normalizer::new(16, ResizeMode::None, false);
        let img = n
            .try_process(&png_bytes(&DynamicImage::ImageRgba8(rgba)))
            .unwrap();
        let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgb8();
        assert!(decoded.get_pixel(1, 8).0.iter().all(|&c| c >= 250));
        assert!(decoded.get_pixel(14, 8).0.iter().all(|&c| c <= 5));
    }

    #[test]
    fn failure_has_message_and_nothing_else() {
        let n = Normalizer::new(256, ResizeMode::Border, false);
        let parts = n.process(b"definitely not an image").into_parts();
        assert_eq!(
            parts,
            (
                None,
                None,
                None,
                None,
                None,
                Some("Image decoding error".to_string())
            )
        );
    }

    #[test]
    fn success_parts_have_no_error() {
        let n = Normalizer::new(32, ResizeMode::Border, false);
        let (bytes, w, h, ow, oh, err) = n.process(&rgb_png(64, 32)).into_parts();
        assert!(bytes.is_some_and(|b| !b.is_empty()));
        assert_eq!((w, h, ow, oh), (Some(32), Some(32), Some(64), Some(32)));
        assert_eq!(err, None);
    }

    #[test]
    fn zero_target_fails_per_call() {
        let n = Normalizer::new(0, ResizeMode::KeepRatio, false);
        let outcome = n.process(&rgb_png(10, 10));
        assert!(!outcome.is_normalized());
        assert!(outcome.error_message().unwrap().contains("empty image"));
    }

    #[test]
    fn target_beyond_jpeg_limit_fails_per_call() {
        let n = Normalizer::new(70_000, ResizeMode::KeepRatio, false);
        let outcome = n.process(&rgb_png(2, 1));
        assert_eq!(
            outcome.error_message(),
            Some("Image of 140000x70000 exceeds the 65535px JPEG limit")
        );
    }

    #[test]
    fn process_reader_reads_whole_stream() {
        let n = Normalizer::new(8, ResizeMode::CenterCrop, false);
        let outcome = n.process_reader(Cursor::new(rgb_png(20, 10)));
        let img = outcome.image().unwrap();
        assert_eq!((img.width, img.height), (8, 8));
    }

    #[test]
    fn process_reader_surfaces_read_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("pipe closed"))
            }
        }

        let n = Normalizer::new(8, ResizeMode::None, false);
        let outcome = n.process_reader(Broken);
        assert_eq!(
            outcome.error_message(),
            Some("Failed to read image stream: pipe closed")
        );
    }
}
