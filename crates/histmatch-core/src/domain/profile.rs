//! Per-image statistics profile.

use serde::{Deserialize, Serialize};

use super::Histogram;

/// One of the three 8-bit color planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Red plane.
    Red,
    /// Green plane.
    Green,
    /// Blue plane.
    Blue,
}

impl Channel {
    /// All channels in RGB order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Offset of this channel inside an RGB triple.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Descriptive statistics for a single channel.
///
/// `min <= median <= max` holds for every value built from at least one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStats {
    /// Intensity histogram; sums to the channel's sample count.
    pub histogram: Histogram,
    /// Smallest intensity present.
    pub min: u8,
    /// Largest intensity present.
    pub max: u8,
    /// Median intensity.
    pub median: u8,
    /// Population mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Dimensions and per-channel statistics of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageProfile {
    /// Identifier of the source image.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Red channel statistics.
    pub red: ChannelStats,
    /// Green channel statistics.
    pub green: ChannelStats,
    /// Blue channel statistics.
    pub blue: ChannelStats,
}

impl ImageProfile {
    /// Total pixel count, `width * height`.
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Statistics for one channel.
    #[must_use]
    pub const fn channel(&self, channel: Channel) -> &ChannelStats {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}
