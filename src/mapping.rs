//! Dense integer index mappings for raw user and book identifiers.
//!
//! Identifiers are sorted before index assignment so the same input table
//! always produces the same mapping, independent of row order.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::types::{Interaction, Rating};

/// A bidirectional mapping between raw string identifiers and dense
/// zero-based `u32` indices.
#[derive(Debug, Clone, Default)]
pub struct IdMap {
    ids: Vec<String>,
    index: FxHashMap<String, u32>,
}

impl IdMap {
    /// Build a mapping from an iterator of raw identifiers.
    ///
    /// Duplicates collapse to one entry; the distinct identifiers are
    /// sorted ascending and indexed in that order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = ids.into_iter().map(Into::into).collect();
        unique.sort_unstable();
        unique.dedup();

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i as u32))
            .collect();

        Self { ids: unique, index }
    }

    /// Dense index for a raw identifier.
    pub fn get(&self, id: &str) -> Option<u32> {
        self.index.get(id).copied()
    }

    /// Raw identifier for a dense index.
    pub fn id(&self, idx: u32) -> Option<&str> {
        self.ids.get(idx as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All identifiers in index order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Map raw rating rows onto dense (user, book) index pairs.
///
/// Returns the user mapping, the book mapping, and the indexed interaction
/// table in the input row order. Every row is guaranteed to be mapped
/// because both mappings are built from the same rows; a missing index
/// would indicate a construction bug and surfaces as [`Error::UnmappedId`].
pub fn index_interactions(ratings: &[Rating]) -> Result<(IdMap, IdMap, Vec<Interaction>)> {
    let users = IdMap::from_ids(ratings.iter().map(|r| r.user_id.clone()));
    let books = IdMap::from_ids(ratings.iter().map(|r| r.book_id.clone()));

    let mut indexed = Vec::with_capacity(ratings.len());
    for r in ratings {
        let user = users.get(&r.user_id).ok_or_else(|| Error::UnmappedId {
            id: r.user_id.clone(),
        })?;
        let book = books.get(&r.book_id).ok_or_else(|| Error::UnmappedId {
            id: r.book_id.clone(),
        })?;
        indexed.push(Interaction::new(user, book));
    }

    Ok((users, books, indexed))
}
