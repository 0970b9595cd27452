//! Top-K ranking of candidate profiles against a query.

use rayon::prelude::*;

use super::similarity::score;
use crate::domain::{ImageProfile, MatchResult};
use crate::error::{Error, Result};

/// Scores every candidate against `query` and returns the `k` most similar,
/// ascending by score.
///
/// Equal scores keep their original candidate order. When `k` exceeds the
/// number of candidates every candidate is returned.
///
/// # Errors
///
/// Returns [`Error::InvalidK`] if `k` is zero.
pub fn find_top_matches(
    query: &ImageProfile,
    candidates: &[ImageProfile],
    k: usize,
) -> Result<Vec<MatchResult>> {
    if k == 0 {
        return Err(Error::InvalidK(k));
    }

    let mut matches: Vec<MatchResult> = candidates
        .par_iter()
        .map(|candidate| MatchResult {
            path: candidate.path.clone(),
            score: score(query, candidate),
        })
        .collect();

    // Stable sort keeps candidate order among ties.
    matches.sort_by(|a, b| a.score.total_cmp(&b.score));
    matches.truncate(k);
    Ok(matches)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{ChannelStats, MedianRule};
    use crate::modules::channel_stats::compute_channel_stats;

    fn channel(samples: &[u8]) -> ChannelStats {
        compute_channel_stats(samples.iter().copied(), MedianRule::Legacy).unwrap()
    }

    /// 2x2 profile where every pixel has the same color.
    fn solid(path: &str, rgb: [u8; 3]) -> ImageProfile {
        ImageProfile {
            path: path.into(),
            width: 2,
            height: 2,
            red: channel(&[rgb[0]; 4]),
            green: channel(&[rgb[1]; 4]),
            blue: channel(&[rgb[2]; 4]),
        }
    }

    fn candidates() -> Vec<ImageProfile> {
        vec![
            solid("blue", [0, 0, 255]),
            solid("red", [255, 0, 0]),
            solid("white", [255, 255, 255]),
            ImageProfile {
                path: "mostly-red".into(),
                width: 2,
                height: 2,
                red: channel(&[255, 255, 255, 0]),
                green: channel(&[0; 4]),
                blue: channel(&[0; 4]),
            },
        ]
    }

    #[test]
    fn test_zero_k_rejected() {
        let query = solid("q", [255, 0, 0]);
        let err = find_top_matches(&query, &candidates(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidK(0)));
    }

    #[test]
    fn test_results_sorted_ascending() {
        let query = solid("q", [255, 0, 0]);
        let results = find_top_matches(&query, &candidates(), 4).unwrap();

        let paths: Vec<_> = results.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["red", "mostly-red", "blue", "white"]);
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
        assert!(results[0].score < 1e-9);
    }

    #[test]
    fn test_truncates_to_k() {
        let query = solid("q", [255, 0, 0]);
        let results = find_top_matches(&query, &candidates(), 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, "red");
        assert_eq!(results[1].path, "mostly-red");
    }

    #[test]
    fn test_k_larger_than_candidates_returns_all() {
        let query = solid("q", [0, 0, 255]);
        let results = find_top_matches(&query, &candidates(), 50).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_scores_match_pairwise_score() {
        let query = solid("q", [255, 0, 0]);
        let pool = candidates();
        let results = find_top_matches(&query, &pool, 3).unwrap();
        for result in &results {
            let candidate = pool.iter().find(|c| c.path == result.path).unwrap();
            assert_eq!(result.score.to_bits(), score(&query, candidate).to_bits());
        }
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let query = solid("q", [10, 10, 10]);
        let pool = vec![
            solid("first", [200, 200, 200]),
            solid("second", [100, 100, 100]),
            solid("third", [50, 50, 50]),
        ];
        // All three are disjoint from the query: every score is 90.
        let results = find_top_matches(&query, &pool, 3).unwrap();
        let paths: Vec<_> = results.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_candidates() {
        let query = solid("q", [1, 2, 3]);
        assert!(find_top_matches(&query, &[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_inputs_untouched() {
        let query = solid("q", [255, 0, 0]);
        let pool = candidates();
        let before = pool.clone();
        let _ = find_top_matches(&query, &pool, 1).unwrap();
        assert_eq!(pool, before);
    }
}
