//! Synthetic pixel-grid builders for testing.

use histmatch_core::domain::PixelGrid;
use image::{Rgb, RgbImage};

/// Builder for creating synthetic RGB pixel grids.
///
/// Every grid gets a `synthetic://` identifier; use
/// [`PixelGrid::with_path`] to give grids in one batch distinct names.
pub struct SyntheticGridBuilder;

impl SyntheticGridBuilder {
    // === Solid Colors ===

    /// Creates a grid where every pixel has the same color.
    #[must_use]
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> PixelGrid {
        PixelGrid::new(
            "synthetic://uniform",
            RgbImage::from_pixel(width, height, Rgb(rgb)),
        )
    }

    /// Pure red (255, 0, 0).
    #[must_use]
    pub fn red(width: u32, height: u32) -> PixelGrid {
        Self::uniform(width, height, [255, 0, 0]).with_path("synthetic://red")
    }

    /// Pure green (0, 255, 0).
    #[must_use]
    pub fn green(width: u32, height: u32) -> PixelGrid {
        Self::uniform(width, height, [0, 255, 0]).with_path("synthetic://green")
    }

    /// Pure blue (0, 0, 255).
    #[must_use]
    pub fn blue(width: u32, height: u32) -> PixelGrid {
        Self::uniform(width, height, [0, 0, 255]).with_path("synthetic://blue")
    }

    /// Uniform gray with all three channels at `value`.
    #[must_use]
    pub fn gray(width: u32, height: u32, value: u8) -> PixelGrid {
        Self::uniform(width, height, [value; 3]).with_path("synthetic://gray")
    }

    // === Patterns ===

    /// Builds a grid from a per-pixel color function.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelGrid {
        PixelGrid::new(
            "synthetic://from_fn",
            RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))),
        )
    }

    /// Checkerboard alternating between two colors.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, a: [u8; 3], b: [u8; 3]) -> PixelGrid {
        Self::from_fn(width, height, |x, y| if (x + y) % 2 == 0 { a } else { b })
            .with_path("synthetic://checkerboard")
    }

    /// Horizontal gradient from 0 to 255 on every channel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> PixelGrid {
        Self::from_fn(width, height, |x, _| {
            let v = ((u32::from(u8::MAX) * x) / width.saturating_sub(1).max(1)) as u8;
            [v, v, v]
        })
        .with_path("synthetic://horizontal_gradient")
    }

    /// Left half one color, right half another.
    #[must_use]
    pub fn split(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> PixelGrid {
        Self::from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
            .with_path("synthetic://split")
    }

    // === Edge Cases ===

    /// Creates a 1x1 grid.
    #[must_use]
    pub fn single_pixel(rgb: [u8; 3]) -> PixelGrid {
        Self::uniform(1, 1, rgb).with_path("synthetic://1x1")
    }

    /// Creates a 2x2 grid from explicit rows.
    #[must_use]
    pub fn tiny(values: [[[u8; 3]; 2]; 2]) -> PixelGrid {
        Self::from_fn(2, 2, |x, y| values[y as usize][x as usize]).with_path("synthetic://2x2")
    }

    /// Creates a zero-pixel grid.
    #[must_use]
    pub fn empty() -> PixelGrid {
        PixelGrid::new("synthetic://empty", RgbImage::new(0, 0))
    }
}
