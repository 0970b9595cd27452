//! Filesystem adapter for discovering and loading images.

use anyhow::{Context, Result};
use histmatch_core::{ImageSource, PixelGrid};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Filesystem image source adapter.
///
/// Decodes any format the `image` crate supports and converts it to 8-bit
/// RGB, discarding alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl FsImageSource {
    /// Creates a new filesystem image source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, path: &str) -> Result<PixelGrid> {
        let image =
            image::open(path).with_context(|| format!("Failed to open image: {path}"))?;
        debug!("Decoded {path} as {:?}", image.color());
        Ok(PixelGrid::new(path, image.to_rgb8()))
    }
}

/// Expands files and directories into a list of supported image files.
///
/// Files are kept in the given order; directory entries are sorted by path.
/// Unsupported files and missing paths are skipped with a warning.
#[must_use]
pub fn collect_image_paths(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                files.push(path.clone());
            } else {
                warn!("Unsupported file type: {}", path.display());
            }
        } else if path.is_dir() {
            collect_from_dir(path, recursive, &mut files);
        } else {
            warn!("Path does not exist: {}", path.display());
        }
    }

    debug!("Found {} image files", files.len());
    files
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut entries: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    entries.sort();

    for path in entries {
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        } else if path.is_dir() && recursive {
            collect_from_dir(&path, recursive, files);
        }
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}
