//! Teleport (restart) distribution builders.
//!
//! The engine normalizes whatever it is given, so builders here only need
//! to produce non-negative weights with a positive sum.

use crate::types::Interaction;

/// Uniform restart distribution; equivalent to passing no teleport at all.
pub fn uniform_teleport(num_nodes: usize) -> Vec<f64> {
    if num_nodes == 0 {
        return Vec::new();
    }
    vec![1.0 / num_nodes as f64; num_nodes]
}

/// Popularity-weighted restart distribution.
///
/// Each book's teleport weight is its raw interaction count, biasing the
/// restart toward heavily reviewed books. Books with no interactions get a
/// floor of 1 so the distribution keeps full support.
pub fn popularity_teleport(interactions: &[Interaction], num_nodes: usize) -> Vec<f64> {
    let mut counts = vec![1.0f64; num_nodes];
    for it in interactions {
        if (it.book as usize) < num_nodes {
            counts[it.book as usize] += 1.0;
        }
    }
    counts
}
