//! Histmatch Adapters - filesystem adapters for histmatch.
//!
//! This crate provides:
//! - A filesystem image source decoding files into RGB pixel grids
//! - Candidate discovery over files and directories

pub mod fs;

pub use fs::{collect_image_paths, FsImageSource};
