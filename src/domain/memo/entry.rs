//! Memo entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One remembered (query, result) pair and the query's embedding.
///
/// Immutable once created; the store owns it for the lifetime of the memo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoEntry<V> {
    id: Uuid,
    vector: Vec<f32>,
    key: String,
    value: V,
    created_at: DateTime<Utc>,
}

impl<V> MemoEntry<V> {
    pub fn new(vector: Vec<f32>, key: impl Into<String>, value: V) -> Self {
        Self {
            id: Uuid::new_v4(),
            vector,
            key: key.into(),
            value,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The embedding of `key`
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Input text the entry was created for
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The computed result
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
