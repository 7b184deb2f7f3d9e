//! In-memory similarity memo
//!
//! Reuses the result of the earliest remembered input whose embedding is at
//! least `threshold`-similar to the query; otherwise computes and remembers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use metrics::{counter, gauge};
use tracing::{debug, instrument};

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::memo::{
    MemoConfig, MemoEntry, MemoOutcome, MemoStats, MemoStore, SimilarityThreshold,
};
use crate::domain::DomainError;

/// Memo over one session's inputs.
///
/// The embedding call runs outside the lock. Scanning, computing on a miss
/// and appending happen under a single lock, so concurrent near-duplicate
/// misses append one entry between them.
#[derive(Debug)]
pub struct SimilarityMemo<V> {
    store: Mutex<MemoStore<V>>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    config: MemoConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> SimilarityMemo<V>
where
    V: Clone + Send + Sync,
{
    pub fn new(embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(embedding_provider, MemoConfig::default())
    }

    pub fn with_config(embedding_provider: Arc<dyn EmbeddingProvider>, config: MemoConfig) -> Self {
        Self {
            store: Mutex::new(MemoStore::new()),
            embedding_provider,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Threshold used by [`Self::memoize`]
    pub fn threshold(&self) -> SimilarityThreshold {
        self.config.similarity_threshold
    }

    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Embedding model requested from the provider
    pub fn model(&self) -> &str {
        self.config
            .embedding_model
            .as_deref()
            .unwrap_or_else(|| self.embedding_provider.default_model())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoStore<V>>, DomainError> {
        self.store
            .lock()
            .map_err(|e| DomainError::internal(format!("Failed to acquire memo lock: {}", e)))
    }

    /// Embed one non-blank text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("text to embed must not be blank"));
        }

        let request = EmbeddingRequest::single(self.model(), text);
        let response = self.embedding_provider.embed(request).await?;

        response
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::embedding_unavailable(
                    self.embedding_provider.provider_name(),
                    "No embedding returned",
                )
            })
    }

    /// Return the remembered result for `text`, or compute and remember it.
    ///
    /// `compute` runs only on a miss; if it fails nothing is stored.
    pub async fn lookup_or_compute<F>(
        &self,
        text: &str,
        threshold: SimilarityThreshold,
        compute: F,
    ) -> Result<MemoOutcome<V>, DomainError>
    where
        F: FnOnce(&str) -> Result<V, DomainError> + Send,
    {
        self.lookup_or_compute_embedded(text, threshold, |text, _| compute(text))
            .await
    }

    /// Like [`Self::lookup_or_compute`], handing `compute` the query embedding
    #[instrument(skip(self, compute), fields(threshold = %threshold))]
    pub async fn lookup_or_compute_embedded<F>(
        &self,
        text: &str,
        threshold: SimilarityThreshold,
        compute: F,
    ) -> Result<MemoOutcome<V>, DomainError>
    where
        F: FnOnce(&str, &[f32]) -> Result<V, DomainError> + Send,
    {
        let vector = self.embed(text).await?;

        let (outcome, entries) = {
            let mut store = self.lock()?;

            if let Some(found) = store.find_first(&vector, threshold)? {
                debug!(
                    similarity = found.similarity,
                    matched = found.entry.key(),
                    "Memo hit"
                );

                let outcome =
                    MemoOutcome::hit(found.entry.value().clone(), found.similarity, found.entry.key());
                (outcome, store.len())
            } else {
                let value = compute(text, &vector)?;
                store.push(MemoEntry::new(vector, text, value.clone()))?;

                debug!(entries = store.len(), "Memo miss, stored new entry");

                (MemoOutcome::miss(value), store.len())
            }
        };

        if outcome.hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
            counter!("semantic_memo_hits_total").increment(1);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            counter!("semantic_memo_misses_total").increment(1);
        }
        gauge!("semantic_memo_entries").set(entries as f64);

        Ok(outcome)
    }

    /// [`Self::lookup_or_compute`] at the configured threshold
    pub async fn memoize<F>(&self, text: &str, compute: F) -> Result<MemoOutcome<V>, DomainError>
    where
        F: FnOnce(&str) -> Result<V, DomainError> + Send,
    {
        self.lookup_or_compute(text, self.threshold(), compute).await
    }

    /// Entries as of this call, in insertion order. The iterator can be
    /// cloned to enumerate again; later inserts are not reflected.
    pub fn all_entries(
        &self,
    ) -> Result<impl Iterator<Item = MemoEntry<V>> + Clone + use<V>, DomainError> {
        Ok(self.lock()?.snapshot().into_iter())
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.lock()?.is_empty())
    }

    pub fn stats(&self) -> Result<MemoStats, DomainError> {
        Ok(MemoStats {
            entries: self.len()?,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }
}
