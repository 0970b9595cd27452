//! Core domain types for histogram profiling and matching.

mod histogram;
mod profile;
mod result;

pub use histogram::{Histogram, MedianRule, BINS};
pub use profile::{Channel, ChannelStats, ImageProfile};
pub use result::{MatchResult, PixelGrid};
