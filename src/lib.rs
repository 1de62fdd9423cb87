//! # imgnorm
//!
//! Normalizes arbitrary encoded images into fixed-size JPEGs for dataset
//! construction. Give it bytes; get back a JPEG plus its size and the size it
//! started at, or an error message.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! bytes → Decode → Flatten alpha → Decide resize → Resize → Encode JPEG
//! ```
//!
//! Every step is a pure function over an in-memory raster. The
//! [`Normalizer`] wires them together and is the single boundary where a
//! typed error becomes a failed [`Outcome`].
//!
//! ```
//! use imgnorm::{Normalizer, ResizeMode};
//!
//! let normalizer = Normalizer::new(256, ResizeMode::Border, false);
//! let outcome = normalizer.process(b"not an image");
//! assert_eq!(outcome.error_message(), Some("Image decoding error"));
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalizer`] | The per-image pipeline and its `Outcome` |
//! | [`imaging`] | Decode, alpha flattening, resize policies, JPEG encode, dimension math |
//! | [`config`] | `imgnorm.toml` loading, layering and validation |
//! | [`batch`] | Normalizing many files on disk in parallel (a caller of the core) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Resize Policies
//!
//! | Mode | Result |
//! |---|---|
//! | `no` | original size |
//! | `keep_ratio` | short side = target, aspect kept |
//! | `center_crop` | exactly `target × target`, cropped from the middle |
//! | `border` | exactly `target × target`, white bars on the short axis |
//!
//! With `resize_only_if_bigger`, images whose relevant side (short side for
//! `keep_ratio`/`center_crop`, long side for `border`) already fits are left
//! at their original size.
//!
//! ## The Core Does No I/O
//!
//! The normalizer borrows a byte slice and returns owned output. Reading
//! files, scheduling work across threads, and persisting results belong to
//! the caller; [`batch`] is one such caller, used by the `imgnorm` binary.
//!
//! ## Permissive Construction
//!
//! [`Normalizer::new`] accepts any target size, including zero. A target the
//! pipeline cannot honour surfaces as a per-image error. The config file
//! layer is stricter and rejects `image_size = 0` up front.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod normalizer;
pub mod output;

pub use config::ConfigError;
pub use imaging::{NormalizeError, ResizeMode, TransformError};
pub use normalizer::{NormalizedImage, Normalizer, Outcome};
