//! Decoded pixel grids and match results.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// A single ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Path of the matched candidate image.
    pub path: String,
    /// Mean angular distance in degrees (0-180); lower is more similar.
    pub score: f64,
}

/// Rectangular grid of 8-bit RGB pixels as produced by an image source.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    path: String,
    pixels: RgbImage,
}

impl PixelGrid {
    /// Wraps decoded RGB pixels under an opaque identifier.
    #[must_use]
    pub fn new(path: impl Into<String>, pixels: RgbImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    /// Replaces the identifier.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Identifier of the source image.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Total pixel count.
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// True for a zero-pixel grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Row-major RGB pixel buffer.
    #[must_use]
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}
