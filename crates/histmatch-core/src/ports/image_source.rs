//! Image source port for loading pixel grids.

use crate::domain::PixelGrid;

/// Port for turning an image identifier into decoded RGB pixels.
pub trait ImageSource: Send + Sync {
    /// Loads the image identified by `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be found or decoded.
    fn load(&self, path: &str) -> anyhow::Result<PixelGrid>;
}
