//! Interaction-table subsetting.
//!
//! The raw table is noisy and heavy-tailed; the graph is built from a
//! "core" subset of active users and books. Subsampling and user-count
//! limits support scaling experiments on smaller slices of the data.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::types::Rating;

/// Keep only rows whose user AND book both have at least `min_reviews`
/// occurrences in the input.
///
/// Counting happens once against the full input; the filter is not
/// iterated to a fixed point, matching a single-pass core extraction.
pub fn core_subset(ratings: &[Rating], min_reviews: usize) -> Vec<Rating> {
    let mut user_counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut book_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for r in ratings {
        *user_counts.entry(r.user_id.as_str()).or_insert(0) += 1;
        *book_counts.entry(r.book_id.as_str()).or_insert(0) += 1;
    }

    ratings
        .iter()
        .filter(|r| {
            user_counts[r.user_id.as_str()] >= min_reviews
                && book_counts[r.book_id.as_str()] >= min_reviews
        })
        .cloned()
        .collect()
}

/// Deterministic seeded subsample of `fraction` of the rows.
///
/// The same seed and input always select the same rows; output keeps the
/// input's relative row order.
pub fn subsample(ratings: &[Rating], fraction: f64, seed: u64) -> Vec<Rating> {
    let fraction = fraction.clamp(0.0, 1.0);
    let take = (ratings.len() as f64 * fraction).round() as usize;
    if take >= ratings.len() {
        return ratings.to_vec();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut picked: Vec<usize> = (0..ratings.len()).collect();
    picked.shuffle(&mut rng);
    picked.truncate(take);
    picked.sort_unstable();

    picked.into_iter().map(|i| ratings[i].clone()).collect()
}

/// Keep only rows belonging to the first `max_users` distinct users, in
/// order of first appearance.
pub fn limit_users(ratings: &[Rating], max_users: usize) -> Vec<Rating> {
    let mut seen: FxHashMap<&str, ()> = FxHashMap::default();
    let mut kept = Vec::new();
    for r in ratings {
        if !seen.contains_key(r.user_id.as_str()) {
            if seen.len() >= max_users {
                continue;
            }
            seen.insert(r.user_id.as_str(), ());
        }
        kept.push(r.clone());
    }
    kept
}
