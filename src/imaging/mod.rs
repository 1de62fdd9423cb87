//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory`, down-cast to 8 bits |
//! | **Flatten alpha** | per-pixel composite over white |
//! | **Resize** | `resize_exact` with `Lanczos3`, then crop or pad |
//! | **Encode** | `JpegEncoder`, quality 95 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: [`ResizeMode`] and the fixed encoder quality
//! - **Codec / Alpha / Resize**: the pixel work, one pure function per step
//! - **Error**: [`NormalizeError`] and [`TransformError`]

pub mod alpha;
pub mod calculations;
pub mod codec;
mod error;
mod params;
pub mod resize;

pub use codec::supported_input_extensions;
pub use error::{NormalizeError, TransformError};
pub use params::{JPEG_QUALITY, ResizeMode};
