//! Ports between the profiling core and its collaborators.
//!
//! Decoding, progress display and result formatting live behind these traits
//! so the core can run on in-memory grids.

mod image_source;
mod progress;
mod result_output;

pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
