//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Dimensions are always `(width, height)`.

use super::params::ResizeMode;

/// Decide whether an image of `dims` gets resized at all.
///
/// `None` never resizes. Otherwise the image is resized unconditionally,
/// unless `only_if_bigger` is set, in which case:
/// - `KeepRatio` / `CenterCrop` resize only when the *short* side exceeds `target`
/// - `Border` resizes only when the *long* side exceeds `target`
///
/// # Examples
/// ```
/// # use imgnorm::imaging::calculations::should_resize;
/// # use imgnorm::imaging::ResizeMode;
/// // 300x200 short side is 200: not bigger than 256
/// assert!(!should_resize(ResizeMode::KeepRatio, (300, 200), 256, true));
/// // ...but its long side is
/// assert!(should_resize(ResizeMode::Border, (300, 200), 256, true));
/// ```
pub fn should_resize(
    mode: ResizeMode,
    dims: (u32, u32),
    target: u32,
    only_if_bigger: bool,
) -> bool {
    let (w, h) = dims;
    match mode {
        ResizeMode::None => false,
        _ if !only_if_bigger => true,
        ResizeMode::KeepRatio | ResizeMode::CenterCrop => w.min(h) > target,
        ResizeMode::Border => w.max(h) > target,
    }
}

/// Scale one side by `factor`, rounding half to even.
fn scale_side(side: u32, factor: f64) -> u32 {
    (side as f64 * factor).round_ties_even() as u32
}

fn scale_by(dims: (u32, u32), factor: f64) -> (u32, u32) {
    if factor == 1.0 {
        return dims;
    }
    (scale_side(dims.0, factor), scale_side(dims.1, factor))
}

/// Dimensions after scaling so the shorter side equals `target`.
///
/// The longer side scales proportionally and may exceed `target`.
///
/// # Examples
/// ```
/// # use imgnorm::imaging::calculations::scale_shortest_to;
/// assert_eq!(scale_shortest_to((100, 200), 256), (256, 512));
/// assert_eq!(scale_shortest_to((1000, 500), 250), (500, 250));
/// ```
pub fn scale_shortest_to(dims: (u32, u32), target: u32) -> (u32, u32) {
    let short = dims.0.min(dims.1);
    scale_by(dims, target as f64 / short as f64)
}

/// Dimensions after scaling so the longer side equals `target`.
///
/// The shorter side scales proportionally and may fall below `target`.
///
/// # Examples
/// ```
/// # use imgnorm::imaging::calculations::scale_longest_to;
/// assert_eq!(scale_longest_to((512, 256), 256), (256, 128));
/// ```
pub fn scale_longest_to(dims: (u32, u32), target: u32) -> (u32, u32) {
    let long = dims.0.max(dims.1);
    scale_by(dims, target as f64 / long as f64)
}

/// Top-left corner of a centered `size × size` crop inside `dims`.
///
/// Margins are split with integer division, so an odd leftover pixel is
/// cut from the right/bottom. Returns `None` if the square does not fit.
pub fn center_crop_origin(dims: (u32, u32), size: u32) -> Option<(u32, u32)> {
    let (w, h) = dims;
    if size > w || size > h {
        return None;
    }
    Some(((w - size) / 2, (h - size) / 2))
}

/// Leading (left, top) padding that centers `dims` on a `size × size` canvas.
///
/// The trailing side receives the extra pixel when the difference is odd.
/// Sides already at or above `size` get no padding.
pub fn pad_offsets(dims: (u32, u32), size: u32) -> (u32, u32) {
    let (w, h) = dims;
    (size.saturating_sub(w) / 2, size.saturating_sub(h) / 2)
}
