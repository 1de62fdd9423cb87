//! The resize policies, each a pure `(image, target) -> image` function.
//!
//! All scaling uses `Lanczos3`. Inputs are expected to be alpha-free
//! (`ImageLuma8` or `ImageRgb8`); [`border`] rejects anything else since it
//! has to synthesize white pixels of the same layout.

use super::calculations::{center_crop_origin, pad_offsets, scale_longest_to, scale_shortest_to};
use super::codec::check_jpeg_bounds;
use super::error::TransformError;
use super::params::ResizeMode;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Apply `mode` to `img`. `ResizeMode::None` returns the image untouched.
pub fn apply(
    mode: ResizeMode,
    img: DynamicImage,
    target: u32,
) -> Result<DynamicImage, TransformError> {
    match mode {
        ResizeMode::None => Ok(img),
        ResizeMode::KeepRatio => keep_ratio(img, target),
        ResizeMode::CenterCrop => center_crop(img, target),
        ResizeMode::Border => border(img, target),
    }
}

/// Scale so the shorter side equals `target`.
pub fn keep_ratio(img: DynamicImage, target: u32) -> Result<DynamicImage, TransformError> {
    let (w, h) = scale_shortest_to((img.width(), img.height()), target);
    scale_exact(img, w, h)
}

/// [`keep_ratio`], then cut a centered `target × target` square.
pub fn center_crop(img: DynamicImage, target: u32) -> Result<DynamicImage, TransformError> {
    let scaled = keep_ratio(img, target)?;
    let (width, height) = (scaled.width(), scaled.height());
    let (x, y) = center_crop_origin((width, height), target).ok_or(
        TransformError::CropOutOfBounds {
            size: target,
            width,
            height,
        },
    )?;
    if (width, height) == (target, target) {
        return Ok(scaled);
    }
    Ok(scaled.crop_imm(x, y, target, target))
}

/// Scale so the longer side equals `target`, then pad with white to a square.
pub fn border(img: DynamicImage, target: u32) -> Result<DynamicImage, TransformError> {
    let (w, h) = scale_longest_to((img.width(), img.height()), target);
    let scaled = scale_exact(img, w, h)?;
    pad_square(scaled, target)
}

fn scale_exact(
    img: DynamicImage,
    width: u32,
    height: u32,
) -> Result<DynamicImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::EmptyResize { width, height });
    }
    check_jpeg_bounds(width, height)?;
    if (width, height) == (img.width(), img.height()) {
        return Ok(img);
    }
    Ok(img.resize_exact(width, height, FilterType::Lanczos3))
}

/// Center `img` on a white `size × size` canvas.
fn pad_square(img: DynamicImage, size: u32) -> Result<DynamicImage, TransformError> {
    if (img.width(), img.height()) == (size, size) {
        return Ok(img);
    }
    let (left, top) = pad_offsets((img.width(), img.height()), size);
    let (x, y) = (i64::from(left), i64::from(top));

    match img {
        DynamicImage::ImageLuma8(gray) => {
            let mut canvas = GrayImage::from_pixel(size, size, Luma([255]));
            imageops::replace(&mut canvas, &gray, x, y);
            Ok(DynamicImage::ImageLuma8(canvas))
        }
        DynamicImage::ImageRgb8(rgb) => {
            let mut canvas = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
            imageops::replace(&mut canvas, &rgb, x, y);
            Ok(DynamicImage::ImageRgb8(canvas))
        }
        other => Err(TransformError::UnsupportedLayout(other.color())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ColorType;

    fn solid_rgb(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    fn dims(img: &DynamicImage) -> (u32, u32) {
        (img.width(), img.height())
    }

    #[test]
    fn none_is_identity() {
        let img = gradient(31, 17);
        let out = apply(ResizeMode::None, img.clone(), 8).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn keep_ratio_upscales_short_side() {
        let out = keep_ratio(gradient(100, 200), 256).unwrap();
        assert_eq!(dims(&out), (256, 512));
    }

    #[test]
    fn keep_ratio_downscales_landscape() {
        let out = keep_ratio(gradient(640, 480), 240).unwrap();
        assert_eq!(dims(&out), (320, 240));
    }

    #[test]
    fn keep_ratio_at_target_is_untouched() {
        let img = gradient(64, 90);
        let out = keep_ratio(img.clone(), 64).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn center_crop_is_square() {
        for (w, h) in [(640, 480), (480, 640), (100, 100), (33, 1000), (257, 256)] {
            let out = center_crop(gradient(w, h), 128).unwrap();
            assert_eq!(dims(&out), (128, 128), "source {w}x{h}");
        }
    }

    #[test]
    fn center_crop_takes_middle_columns() {
        // 300x100 at target 100: no scaling, crop x in 100..200
        let out = center_crop(gradient(300, 100), 100).unwrap().to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0[0], 100);
        assert_eq!(out.get_pixel(99, 0).0[0], 199);
    }

    #[test]
    fn border_is_square_with_white_padding() {
        let out = border(solid_rgb(512, 256, 0), 256).unwrap();
        assert_eq!(dims(&out), (256, 256));
        let rgb = out.to_rgb8();
        // 256x128 content centered vertically: rows 0..64 and 192..256 are padding
        for x in [0, 128, 255] {
            assert_eq!(rgb.get_pixel(x, 0).0, [255, 255, 255]);
            assert_eq!(rgb.get_pixel(x, 63).0, [255, 255, 255]);
            assert_eq!(rgb.get_pixel(x, 192).0, [255, 255, 255]);
            assert_eq!(rgb.get_pixel(x, 255).0, [255, 255, 255]);
            assert!(rgb.get_pixel(x, 128).0[0] < 8);
        }
    }

    #[test]
    fn border_pads_horizontally_for_portrait() {
        let out = border(solid_rgb(50, 200, 0), 100).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (100, 100));
        // 25x100 content: 37 columns left, 38 right
        assert_eq!(out.get_pixel(36, 50).0, [255, 255, 255]);
        assert!(out.get_pixel(37, 50).0[0] < 8);
        assert!(out.get_pixel(61, 50).0[0] < 8);
        assert_eq!(out.get_pixel(62, 50).0, [255, 255, 255]);
    }

    #[test]
    fn border_keeps_grayscale() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 20, Luma([0])));
        let out = border(img, 40).unwrap();
        assert_eq!(out.color(), ColorType::L8);
        assert_eq!(out.to_luma8().get_pixel(0, 0).0, [255]);
    }

    #[test]
    fn border_square_source_has_no_padding() {
        let out = border(solid_rgb(300, 300, 10), 150).unwrap();
        assert_eq!(dims(&out), (150, 150));
        assert!(out.to_rgb8().get_pixel(0, 0).0[0] < 20);
    }

    #[test]
    fn border_rejects_alpha() {
        let img = DynamicImage::new_rgba8(10, 5);
        assert!(matches!(
            border(img, 10).unwrap_err(),
            TransformError::UnsupportedLayout(ColorType::Rgba8)
        ));
    }

    #[test]
    fn zero_target_is_an_error() {
        for mode in [
            ResizeMode::KeepRatio,
            ResizeMode::CenterCrop,
            ResizeMode::Border,
        ] {
            let err = apply(mode, gradient(10, 10), 0).unwrap_err();
            assert!(
                matches!(err, TransformError::EmptyResize { .. }),
                "{mode}: {err}"
            );
        }
    }

    #[test]
    fn extreme_aspect_collapsing_side_is_an_error() {
        let err = border(gradient(2000, 1), 100).unwrap_err();
        assert!(matches!(
            err,
            TransformError::EmptyResize {
                width: 100,
                height: 0
            }
        ));
    }

    #[test]
    fn oversized_target_is_rejected_before_allocating() {
        let err = keep_ratio(gradient(2, 1), 70_000).unwrap_err();
        assert!(matches!(err, TransformError::TooLarge { .. }));
    }
}
