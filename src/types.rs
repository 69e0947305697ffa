//! Shared value types for the interaction table.
//!
//! Two layers of record flow through the crate: [`Rating`] rows carry raw
//! string identifiers as loaded from the interaction table, and
//! [`Interaction`] rows carry the dense zero-based indices produced by the
//! mapping stage. Everything downstream of [`crate::mapping`] operates on
//! `Interaction` only.

use serde::{Deserialize, Serialize};

/// A raw interaction row: one user rated one book.
///
/// Identifiers are opaque strings straight from the source table; the
/// rating value is kept for subset filtering and reporting but plays no
/// role in graph construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: String,
    pub book_id: String,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: impl Into<String>, book_id: impl Into<String>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            book_id: book_id.into(),
            rating,
        }
    }
}

/// An indexed interaction: (user index, book index).
///
/// Both indices are dense and zero-based. Uniqueness per user is NOT
/// guaranteed here; the aggregator deduplicates each user's book set before
/// pair generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interaction {
    pub user: u32,
    pub book: u32,
}

impl Interaction {
    pub fn new(user: u32, book: u32) -> Self {
        Self { user, book }
    }
}

impl From<(u32, u32)> for Interaction {
    fn from((user, book): (u32, u32)) -> Self {
        Self { user, book }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_from_tuple() {
        let i: Interaction = (3, 7).into();
        assert_eq!(i.user, 3);
        assert_eq!(i.book, 7);
    }

    #[test]
    fn test_rating_serde_roundtrip() {
        let r = Rating::new("u1", "b9", 4.0);
        let json = serde_json::to_string(&r).unwrap();
        let back: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
