//! Histmatch Core - color-histogram statistics and similarity ranking.
//!
//! Builds per-channel histograms and descriptive statistics for RGB images,
//! scores image pairs by the mean angular distance between their normalized
//! channel histograms, and ranks candidates against a query.

pub mod domain;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use domain::{
    Channel, ChannelStats, Histogram, ImageProfile, MatchResult, MedianRule, PixelGrid,
};
pub use error::{Error, Result};
pub use modules::{find_top_matches, score, ImageProfiler, ProfilerConfig};
pub use pipeline::Pipeline;
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};
