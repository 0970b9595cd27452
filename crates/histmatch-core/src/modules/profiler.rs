//! Image profiler: pixel grid to per-channel statistics.

use rayon::prelude::*;

use super::channel_stats::ChannelAccumulator;
use crate::domain::{Channel, ChannelStats, ImageProfile, MedianRule, PixelGrid};
use crate::error::{Error, Result};

/// Pixel count above which the grid scan is split across the rayon pool.
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Configuration for profiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilerConfig {
    /// Rule used to read the median off each channel histogram.
    pub median_rule: MedianRule,
}

/// Builds [`ImageProfile`]s from pixel grids.
#[derive(Debug, Clone, Default)]
pub struct ImageProfiler {
    config: ProfilerConfig,
}

impl ImageProfiler {
    /// Creates a profiler with the given configuration.
    #[must_use]
    pub const fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Returns the profiler configuration.
    #[must_use]
    pub const fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles every channel of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if the grid has no pixels.
    pub fn build_profile(&self, grid: &PixelGrid) -> Result<ImageProfile> {
        if grid.is_empty() {
            return Err(Error::invalid_image(grid.path(), "image has no pixels"));
        }

        let [red, green, blue] = accumulate_channels(grid.pixels().as_raw());
        let finish = |acc: ChannelAccumulator| -> Result<ChannelStats> {
            acc.finish(self.config.median_rule)
                .ok_or_else(|| Error::invalid_image(grid.path(), "channel has no samples"))
        };

        Ok(ImageProfile {
            path: grid.path().to_owned(),
            width: grid.width(),
            height: grid.height(),
            red: finish(red)?,
            green: finish(green)?,
            blue: finish(blue)?,
        })
    }
}

type Accumulators = [ChannelAccumulator; 3];

fn new_accumulators() -> Accumulators {
    std::array::from_fn(|_| ChannelAccumulator::default())
}

fn push_pixel(mut acc: Accumulators, pixel: &[u8]) -> Accumulators {
    for channel in Channel::ALL {
        acc[channel.index()].push(pixel[channel.index()]);
    }
    acc
}

fn merge_accumulators(mut a: Accumulators, b: Accumulators) -> Accumulators {
    for (mine, theirs) in a.iter_mut().zip(&b) {
        mine.merge(theirs);
    }
    a
}

/// Scans a row-major RGB buffer once, accumulating all three channels.
fn accumulate_channels(raw: &[u8]) -> Accumulators {
    if raw.len() / 3 >= PARALLEL_THRESHOLD {
        raw.par_chunks_exact(3)
            .fold(new_accumulators, push_pixel)
            .reduce(new_accumulators, merge_accumulators)
    } else {
        raw.chunks_exact(3).fold(new_accumulators(), push_pixel)
    }
}
