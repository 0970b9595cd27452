//! Single-channel statistics.
//!
//! One accumulation pass counts samples into 256 bins. Every statistic is
//! then read off the finished [`Histogram`].

use crate::domain::{ChannelStats, Histogram, MedianRule, BINS};

/// Running bin counts for one channel.
///
/// Accumulators can be merged, so a channel may be split across workers and
/// reduced afterwards.
#[derive(Debug, Clone)]
pub struct ChannelAccumulator {
    bins: [u64; BINS],
    count: u64,
}

impl Default for ChannelAccumulator {
    fn default() -> Self {
        Self {
            bins: [0; BINS],
            count: 0,
        }
    }
}

impl ChannelAccumulator {
    /// Records one sample.
    pub fn push(&mut self, value: u8) {
        self.bins[usize::from(value)] += 1;
        self.count += 1;
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.bins.iter_mut().zip(&other.bins) {
            *mine += theirs;
        }
        self.count += other.count;
    }

    /// Number of samples recorded so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Derives the final statistics. Returns `None` when no sample was seen.
    #[must_use]
    pub fn finish(self, rule: MedianRule) -> Option<ChannelStats> {
        let histogram = Histogram::from_bins(self.bins);
        let min = histogram.min()?;
        let max = histogram.max()?;
        let median = histogram.median(rule)?;
        let mean = histogram.mean();
        let std_dev = histogram.std_dev_about(mean);

        Some(ChannelStats {
            histogram,
            min,
            max,
            median,
            mean,
            std_dev,
        })
    }
}

/// Computes histogram, min, max, median, mean and standard deviation for a
/// sequence of samples. Returns `None` for an empty sequence.
#[must_use]
pub fn compute_channel_stats<I>(samples: I, rule: MedianRule) -> Option<ChannelStats>
where
    I: IntoIterator<Item = u8>,
{
    samples
        .into_iter()
        .fold(ChannelAccumulator::default(), |mut acc, value| {
            acc.push(value);
            acc
        })
        .finish(rule)
}
