//! Profiling and ranking components.
//!
//! Leaf to root: channel statistics, image profiler, similarity scorer,
//! top-K matcher.

mod channel_stats;
mod matcher;
mod profiler;
mod similarity;

pub use channel_stats::{compute_channel_stats, ChannelAccumulator};
pub use matcher::find_top_matches;
pub use profiler::{ImageProfiler, ProfilerConfig};
pub use similarity::{angular_distance, channel_distance, cosine_similarity, score};
