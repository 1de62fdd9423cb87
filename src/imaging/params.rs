//! Parameter types for the normalization pipeline.
//!
//! These describe *what* to do to an image, not *how*. The pixel work lives in
//! [`resize`](super::resize) and [`codec`](super::codec).
//!
//! ## Types
//!
//! - [`ResizeMode`]: one of the four resize policies. Parsed once from its
//!   textual name (`"no"`, `"keep_ratio"`, `"center_crop"`, `"border"`), then
//!   matched on for every image.
//! - [`JPEG_QUALITY`]: the fixed encoder quality for normalized output.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JPEG quality used for every normalized image. Not configurable.
pub const JPEG_QUALITY: u8 = 95;

/// How an image is brought to the target size.
///
/// | Mode | Scale | Then |
/// |---|---|---|
/// | `None` | none | nothing |
/// | `KeepRatio` | short side → target | nothing |
/// | `CenterCrop` | short side → target | crop centered `target × target` |
/// | `Border` | long side → target | pad with white to `target × target` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResizeMode {
    None,
    KeepRatio,
    CenterCrop,
    Border,
}

impl ResizeMode {
    pub const ALL: [ResizeMode; 4] = [
        ResizeMode::None,
        ResizeMode::KeepRatio,
        ResizeMode::CenterCrop,
        ResizeMode::Border,
    ];

    /// The configuration name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::None => "no",
            ResizeMode::KeepRatio => "keep_ratio",
            ResizeMode::CenterCrop => "center_crop",
            ResizeMode::Border => "border",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownResizeMode(s.to_string()))
    }
}

impl TryFrom<String> for ResizeMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResizeMode> for String {
    fn from(mode: ResizeMode) -> Self {
        mode.as_str().to_string()
    }
}
