//! Alpha flattening onto an opaque white background.

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

/// Composite one channel of a pixel with coverage `alpha` over white.
///
/// `out = alpha/255 * c + 255 - alpha`, clamped to `[0, 255]` and rounded
/// half to even.
fn over_white(c: u8, alpha: u8) -> u8 {
    let a = alpha as f64;
    let v = a / 255.0 * c as f64 + 255.0 - a;
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Drop the alpha channel of `rgba` by compositing it over white.
pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

/// Return an image without alpha: RGBA is flattened, everything else passes through.
pub fn remove_alpha(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgba8(rgba) => DynamicImage::ImageRgb8(flatten_onto_white(&rgba)),
        other => other,
    }
}
