//! Cosine-distance scoring between two image profiles.
//!
//! Each channel histogram is normalized into a distribution, compared by
//! cosine similarity and turned into an angle in degrees. The score is the
//! mean of the three channel angles: 0 for identical distributions, 90 for
//! disjoint ones. Lower is more similar.

use crate::domain::{Channel, Histogram, ImageProfile};

/// Mean angular distance in degrees between the channel histograms of two
/// profiles.
///
/// Symmetric in its arguments. Zero-pixel profiles are scored, not rejected:
/// their empty channels contribute 90 degrees each.
#[must_use]
pub fn score(query: &ImageProfile, candidate: &ImageProfile) -> f64 {
    let total: f64 = Channel::ALL
        .iter()
        .map(|&channel| {
            channel_distance(
                &query.channel(channel).histogram,
                query.pixel_count(),
                &candidate.channel(channel).histogram,
                candidate.pixel_count(),
            )
        })
        .sum();
    total / 3.0
}

/// Angular distance in degrees between two histograms after normalizing each
/// by its pixel count.
#[must_use]
pub fn channel_distance(a: &Histogram, a_pixels: u64, b: &Histogram, b_pixels: u64) -> f64 {
    let p = a.normalized(a_pixels);
    let q = b.normalized(b_pixels);
    angular_distance(cosine_similarity(&p, &q))
}

/// Cosine similarity clamped to `[-1, 1]`.
///
/// Returns exactly `0.0` when either vector has zero magnitude.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (&x, &y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // sqrt(n * n) == n exactly, so a vector compared with itself yields 1.
    (dot / (norm_a * norm_b).sqrt()).clamp(-1.0, 1.0)
}

/// Converts a cosine similarity to an angle in degrees (0-180).
#[must_use]
pub fn angular_distance(similarity: f64) -> f64 {
    similarity.clamp(-1.0, 1.0).acos().to_degrees()
}
