//! Ordered memo store

use super::{MemoEntry, SimilarityThreshold};
use crate::domain::embedding::{cosine_similarity, l2_norm};
use crate::domain::DomainError;

/// The earliest stored entry that qualified for a query
#[derive(Debug)]
pub struct MemoMatch<'a, V> {
    pub entry: &'a MemoEntry<V>,
    pub similarity: f32,
}

/// Insertion-ordered sequence of memo entries.
///
/// All vectors share one dimension, fixed by the first entry. Entries are
/// never mutated or removed.
#[derive(Debug, Clone)]
pub struct MemoStore<V> {
    entries: Vec<MemoEntry<V>>,
}

impl<V> Default for MemoStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension shared by every stored vector, if any entry exists
    pub fn dimensions(&self) -> Option<usize> {
        self.entries.first().map(|e| e.vector().len())
    }

    /// Reject vectors that could never be compared against the store
    pub fn check_vector(&self, vector: &[f32]) -> Result<(), DomainError> {
        if let Some(expected) = self.dimensions() {
            if vector.len() != expected {
                return Err(DomainError::dimension_mismatch(expected, vector.len()));
            }
        }

        if l2_norm(vector) == 0.0 {
            return Err(DomainError::degenerate_vector(
                "query embedding has zero norm",
            ));
        }

        Ok(())
    }

    /// Scan in insertion order and stop at the first entry whose similarity
    /// to `query` reaches `threshold`.
    pub fn find_first(
        &self,
        query: &[f32],
        threshold: SimilarityThreshold,
    ) -> Result<Option<MemoMatch<'_, V>>, DomainError> {
        self.check_vector(query)?;

        for entry in &self.entries {
            let similarity = cosine_similarity(query, entry.vector())?;

            if threshold.accepts(similarity) {
                return Ok(Some(MemoMatch { entry, similarity }));
            }
        }

        Ok(None)
    }

    /// Append an entry, enforcing the shared dimension
    pub fn push(&mut self, entry: MemoEntry<V>) -> Result<(), DomainError> {
        self.check_vector(entry.vector())?;
        self.entries.push(entry);
        Ok(())
    }
}

impl<V: Clone> MemoStore<V> {
    /// Copy of the current entries, independent of later inserts
    pub fn snapshot(&self) -> Vec<MemoEntry<V>> {
        self.entries.clone()
    }
}
