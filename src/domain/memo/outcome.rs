//! Lookup outcome and statistics

use serde::{Deserialize, Serialize};

/// Result of a memoized lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoOutcome<V> {
    /// The reused or freshly computed value
    pub value: V,
    /// Whether the value came from a stored entry
    pub hit: bool,
    /// Similarity of the entry that answered (hits only)
    pub similarity: Option<f32>,
    /// Key of the entry that answered (hits only)
    pub matched_key: Option<String>,
}

impl<V> MemoOutcome<V> {
    pub fn hit(value: V, similarity: f32, matched_key: impl Into<String>) -> Self {
        Self {
            value,
            hit: true,
            similarity: Some(similarity),
            matched_key: Some(matched_key.into()),
        }
    }

    pub fn miss(value: V) -> Self {
        Self {
            value,
            hit: false,
            similarity: None,
            matched_key: None,
        }
    }
}

/// Statistics for a memo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl MemoStats {
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;

        if total == 0 {
            return 0.0;
        }

        self.hits as f32 / total as f32
    }
}
