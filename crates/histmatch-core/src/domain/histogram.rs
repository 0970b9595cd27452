//! 256-bin intensity histogram for a single 8-bit channel.

use serde::{Deserialize, Serialize, Serializer};

/// Number of intensity bins for an 8-bit channel.
pub const BINS: usize = 256;

/// How the median is read off a histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianRule {
    /// First bin whose cumulative count reaches `N / 2`.
    ///
    /// For an even count landing exactly on `N / 2` the rule averages the bin
    /// with itself, so the result is always a bin index. This reproduces the
    /// historical output of the tool and is not the statistical median.
    #[default]
    Legacy,
    /// Textbook median. Even counts average the two middle-ranked samples,
    /// rounding down, even when they fall in different bins.
    Exact,
}

/// Histogram of 8-bit intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BINS],
    total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::from_bins([0; BINS])
    }
}

impl Histogram {
    /// Builds a histogram by counting every sample.
    #[must_use]
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut bins = [0u64; BINS];
        for value in samples {
            bins[usize::from(value)] += 1;
        }
        Self::from_bins(bins)
    }

    /// Wraps precomputed bin counts.
    #[must_use]
    pub fn from_bins(bins: [u64; BINS]) -> Self {
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the raw bin counts, indexed by intensity.
    #[must_use]
    pub const fn bins(&self) -> &[u64; BINS] {
        &self.bins
    }

    /// Count of samples at one intensity.
    #[must_use]
    pub const fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Returns the total sample count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// True when no sample was counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Smallest intensity with a nonzero count.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn min(&self) -> Option<u8> {
        // Safe: bin indices are 0-255
        self.bins.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Largest intensity with a nonzero count.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn max(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Population mean intensity, `0.0` for an empty histogram.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Population standard deviation around `mean` (divisor `N`).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev_about(&self, mean: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let squared_diffs: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum();
        (squared_diffs / self.total as f64).sqrt()
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev_about(self.mean())
    }

    /// Median intensity under the given rule, `None` when empty.
    #[must_use]
    pub fn median(&self, rule: MedianRule) -> Option<u8> {
        match rule {
            MedianRule::Legacy => self.legacy_median(),
            MedianRule::Exact => self.exact_median(),
        }
    }

    fn legacy_median(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        // A lone sample would otherwise match bin 0 with a target of zero.
        let mid = (self.total / 2).max(1);
        // The even-count branch averages the bin with itself, which is the bin.
        self.value_at_rank(mid)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn exact_median(&self) -> Option<u8> {
        let n = self.total;
        let lower = self.value_at_rank(n.div_ceil(2))?;
        if n % 2 == 1 {
            return Some(lower);
        }
        let upper = self.value_at_rank(n / 2 + 1)?;
        // Safe: the average of two u8 values fits in u8
        Some(((u16::from(lower) + u16::from(upper)) / 2) as u8)
    }

    /// Intensity of the sample with 1-based rank `rank` in sorted order.
    #[allow(clippy::cast_possible_truncation)]
    fn value_at_rank(&self, rank: u64) -> Option<u8> {
        if rank == 0 {
            return None;
        }
        let mut cumulative = 0u64;
        for (i, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            if cumulative >= rank {
                return Some(i as u8);
            }
        }
        None
    }

    /// Divides every bin by `divisor` (floored at 1) to get a distribution.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn normalized(&self, divisor: u64) -> [f64; BINS] {
        let divisor = divisor.max(1) as f64;
        let mut out = [0.0; BINS];
        for (slot, &count) in out.iter_mut().zip(&self.bins) {
            *slot = count as f64 / divisor;
        }
        out
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.bins.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(samples: &[u8]) -> Histogram {
        Histogram::from_samples(samples.iter().copied())
    }

    #[test]
    fn test_histogram_from_samples() {
        let h = hist(&[0, 0, 7, 255]);
        assert_eq!(h.total(), 4);
        assert_eq!(h.count(0), 2);
        assert_eq!(h.count(7), 1);
        assert_eq!(h.count(255), 1);
        assert_eq!(h.bins().iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_empty_histogram() {
        let h = Histogram::default();
        assert!(h.is_empty());
        assert_eq!(h.min(), None);
        assert_eq!(h.max(), None);
        assert_eq!(h.median(MedianRule::Legacy), None);
        assert_eq!(h.median(MedianRule::Exact), None);
        assert!(h.mean().abs() < f64::EPSILON);
        assert!(h.std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_max() {
        let h = hist(&[42, 3, 200, 17]);
        assert_eq!(h.min(), Some(3));
        assert_eq!(h.max(), Some(200));
    }

    #[test]
    fn test_mean_and_std_dev() {
        // {2, 4, 4, 4, 5, 5, 7, 9}: mean 5, population std dev 2
        let h = hist(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((h.mean() - 5.0).abs() < 1e-12);
        assert!((h.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_legacy_median_two_samples() {
        // N = 2, mid = 1. Bin 10 brings the count to exactly 1 with N even,
        // so the rule averages 10 with itself.
        let h = hist(&[10, 20]);
        assert_eq!(h.median(MedianRule::Legacy), Some(10));
    }

    #[test]
    fn test_exact_median_two_samples() {
        let h = hist(&[10, 20]);
        assert_eq!(h.median(MedianRule::Exact), Some(15));
    }

    #[test]
    fn test_legacy_median_odd_count() {
        // N = 3, mid = 1: first bin with cumulative >= 1 is the smallest sample
        let h = hist(&[1, 2, 3]);
        assert_eq!(h.median(MedianRule::Legacy), Some(1));
        assert_eq!(h.median(MedianRule::Exact), Some(2));
    }

    #[test]
    fn test_legacy_median_overshoot() {
        // N = 4, mid = 2: bin 5 takes the count from 0 to 3, beyond mid
        let h = hist(&[5, 5, 5, 9]);
        assert_eq!(h.median(MedianRule::Legacy), Some(5));
        assert_eq!(h.median(MedianRule::Exact), Some(5));
    }

    #[test]
    fn test_single_sample_median() {
        let h = hist(&[200]);
        assert_eq!(h.median(MedianRule::Legacy), Some(200));
        assert_eq!(h.median(MedianRule::Exact), Some(200));
    }

    #[test]
    fn test_exact_median_rounds_down() {
        let h = hist(&[0, 255]);
        assert_eq!(h.median(MedianRule::Exact), Some(127));
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let h = hist(&[0, 1, 1, 2]);
        let p = h.normalized(h.total());
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_zero_divisor() {
        let h = Histogram::default();
        let p = h.normalized(0);
        assert!(p.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_median_rule_default_is_legacy() {
        assert_eq!(MedianRule::default(), MedianRule::Legacy);
    }
}
